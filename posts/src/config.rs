//! Configuration for the posts feed.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is read first when present.

use crate::http::DEFAULT_BASE_URL;
use crate::types::DEFAULT_USER_ID;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse
    #[error("invalid value {value:?} for {key}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },
}

/// Posts feed configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsConfig {
    /// Base URL of the remote collection (`POSTS_API_URL`)
    pub api_url: String,
    /// Posts requested per fetch (`POSTS_PAGE_SIZE`, default: 10)
    pub page_size: usize,
    /// Author id attached to created posts (`POSTS_USER_ID`, default: 1)
    pub user_id: u64,
    /// Per-request timeout in seconds (`POSTS_REQUEST_TIMEOUT_SECS`, default: 10)
    pub request_timeout_secs: u64,
    /// Delay before a successful create clears the error slot, in
    /// milliseconds (`POSTS_ERROR_CLEAR_DELAY_MS`, default: 3000, 0 disables)
    pub error_clear_delay_ms: u64,
    /// How long shutdown waits for in-flight requests, in seconds
    /// (`POSTS_SHUTDOWN_TIMEOUT_SECS`, default: 5)
    pub shutdown_timeout_secs: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            page_size: 10,
            user_id: DEFAULT_USER_ID,
            request_timeout_secs: 10,
            error_clear_delay_ms: 3000,
            shutdown_timeout_secs: 5,
        }
    }
}

impl PostsConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable is set but
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is normal
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            api_url: lookup("POSTS_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            page_size: parse(&lookup, "POSTS_PAGE_SIZE", defaults.page_size)?,
            user_id: parse(&lookup, "POSTS_USER_ID", defaults.user_id)?,
            request_timeout_secs: parse(
                &lookup,
                "POSTS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            error_clear_delay_ms: parse(
                &lookup,
                "POSTS_ERROR_CLEAR_DELAY_MS",
                defaults.error_clear_delay_ms,
            )?,
            shutdown_timeout_secs: parse(
                &lookup,
                "POSTS_SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout_secs,
            )?,
        })
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Error auto-clear delay, `None` when disabled
    #[must_use]
    pub const fn error_clear_delay(&self) -> Option<Duration> {
        if self.error_clear_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.error_clear_delay_ms))
        }
    }

    /// Shutdown grace period
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
