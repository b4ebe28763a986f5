//! Access to the remote posts collection.
//!
//! The orchestrator only talks to the collection through [`PostsClient`], so
//! the HTTP implementation and the in-memory mock are interchangeable.
//!
//! # Dyn Compatibility
//!
//! Methods return boxed futures instead of using `async fn` so the client can
//! live in the environment as `Arc<dyn PostsClient>` and be captured by
//! effects.

use crate::error::PostsError;
use crate::types::{Post, PostDraft};
use futures::future::BoxFuture;

/// Boxed future returned by [`PostsClient`] methods
pub type ClientFuture<'a, T> = BoxFuture<'a, Result<T, PostsError>>;

/// Remote posts collection
pub trait PostsClient: Send + Sync {
    /// Fetch at most `limit` posts
    ///
    /// Posts come back in whatever order the collection chooses; callers
    /// normalize them.
    ///
    /// # Errors
    ///
    /// - [`PostsError::Transport`]: no response
    /// - [`PostsError::Status`]: non-success status
    /// - [`PostsError::Decode`]: body is not a list of posts
    fn list(&self, limit: usize) -> ClientFuture<'_, Vec<Post>>;

    /// Create a post from a validated draft
    ///
    /// Returns the post as the collection echoed it back. The echoed id is
    /// not trusted to be unique.
    ///
    /// # Errors
    ///
    /// Same as [`list`](Self::list).
    fn create<'a>(&'a self, draft: &'a PostDraft) -> ClientFuture<'a, Post>;
}
