//! Error types for the remote posts collection

use thiserror::Error;

/// Which remote operation failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `GET /posts`
    List,
    /// `POST /posts`
    Create,
}

impl Operation {
    /// Message shown when no more specific cause is available
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::List => "failed to fetch posts",
            Self::Create => "failed to create post",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => f.write_str("list"),
            Self::Create => f.write_str("create"),
        }
    }
}

/// Errors that can occur when talking to the remote posts collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsError {
    /// Request never produced a response (unreachable host, timeout)
    #[error("{0}")]
    Transport(String),

    /// Remote collection answered with a non-success status
    #[error("{operation} returned HTTP {status}")]
    Status {
        /// Operation that failed
        operation: Operation,
        /// HTTP status code
        status: u16,
    },

    /// Response body did not decode into posts
    #[error("{0}")]
    Decode(String),
}

impl PostsError {
    /// Collapses the error into the single message stored in state
    ///
    /// Status failures use the operation's fixed message; transport and
    /// decode failures keep their cause when it says anything.
    #[must_use]
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            Self::Transport(cause) | Self::Decode(cause) if !cause.trim().is_empty() => {
                cause.clone()
            },
            _ => operation.fallback_message().to_string(),
        }
    }
}
