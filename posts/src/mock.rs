//! In-memory [`PostsClient`] for tests and offline runs
//!
//! Responses are either scripted (queued per operation, each with its own
//! delay) or fall back to defaults: `list` returns the seeded posts and
//! `create` echoes the draft back under [`ECHO_ID`], the way the public
//! placeholder collection does.

use crate::client::{ClientFuture, PostsClient};
use crate::error::PostsError;
use crate::types::{Post, PostDraft};
use futures::FutureExt;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Id the placeholder collection assigns to every created post
pub const ECHO_ID: i64 = 101;

struct Scripted<T> {
    delay: Duration,
    result: Result<T, PostsError>,
}

#[derive(Default)]
struct MockState {
    posts: Vec<Post>,
    list_script: VecDeque<Scripted<Vec<Post>>>,
    create_script: VecDeque<Scripted<Post>>,
    drafts: Vec<PostDraft>,
}

/// Scriptable in-memory posts collection
#[derive(Default)]
pub struct MockPostsClient {
    state: Mutex<MockState>,
    latency: Duration,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MockPostsClient {
    /// Empty collection with no latency
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection pre-seeded with `posts`
    #[must_use]
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let client = Self::new();
        client.lock().posts = posts;
        client
    }

    /// Apply `latency` to every unscripted response
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Queue the result of the next unscripted `list` call
    pub fn enqueue_list(&self, result: Result<Vec<Post>, PostsError>) {
        self.enqueue_list_after(self.latency, result);
    }

    /// Queue a `list` result that is returned after `delay`
    pub fn enqueue_list_after(&self, delay: Duration, result: Result<Vec<Post>, PostsError>) {
        self.lock().list_script.push_back(Scripted { delay, result });
    }

    /// Queue the result of the next unscripted `create` call
    pub fn enqueue_create(&self, result: Result<Post, PostsError>) {
        self.enqueue_create_after(self.latency, result);
    }

    /// Queue a `create` result that is returned after `delay`
    pub fn enqueue_create_after(&self, delay: Duration, result: Result<Post, PostsError>) {
        self.lock().create_script.push_back(Scripted { delay, result });
    }

    /// Number of `list` calls so far
    #[must_use]
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `create` calls so far
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Drafts received by `create`, in call order
    #[must_use]
    pub fn drafts(&self) -> Vec<PostDraft> {
        self.lock().drafts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn respond_list(&self, limit: usize) -> Result<Vec<Post>, PostsError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = {
            let mut state = self.lock();
            state.list_script.pop_front().unwrap_or_else(|| Scripted {
                delay: self.latency,
                result: Ok(state.posts.iter().take(limit).cloned().collect()),
            })
        };

        pause(scripted.delay).await;
        scripted.result
    }

    async fn respond_create(&self, draft: &PostDraft) -> Result<Post, PostsError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        let scripted = {
            let mut state = self.lock();
            state.drafts.push(draft.clone());
            state.create_script.pop_front().unwrap_or_else(|| Scripted {
                delay: self.latency,
                result: Ok(Post::new(ECHO_ID, draft.title(), draft.body(), draft.user_id())),
            })
        };

        pause(scripted.delay).await;
        scripted.result
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl PostsClient for MockPostsClient {
    fn list(&self, limit: usize) -> ClientFuture<'_, Vec<Post>> {
        self.respond_list(limit).boxed()
    }

    fn create<'a>(&'a self, draft: &'a PostDraft) -> ClientFuture<'a, Post> {
        self.respond_create(draft).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Operation;

    #[tokio::test]
    async fn list_defaults_to_seeded_posts() {
        let client = MockPostsClient::with_posts(vec![
            Post::new(1, "a", "a", 1),
            Post::new(2, "b", "b", 1),
            Post::new(3, "c", "c", 1),
        ]);

        let page = client.list(2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(client.list_calls(), 1);
    }

    #[tokio::test]
    async fn scripted_results_come_first() {
        let client = MockPostsClient::with_posts(vec![Post::new(1, "a", "a", 1)]);
        client.enqueue_list(Err(PostsError::Status {
            operation: Operation::List,
            status: 503,
        }));

        assert!(client.list(10).await.is_err());
        assert_eq!(client.list(10).await.unwrap().len(), 1);
        assert_eq!(client.list_calls(), 2);
    }

    #[tokio::test]
    async fn create_echoes_draft() {
        let client = MockPostsClient::new();
        let draft = PostDraft::new("Hello", "World", 1).unwrap();

        let post = client.create(&draft).await.unwrap();
        assert_eq!(post, Post::new(ECHO_ID, "Hello", "World", 1));
        assert_eq!(client.drafts(), vec![draft]);
        assert_eq!(client.create_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_delay_is_honoured() {
        let client = MockPostsClient::new();
        client.enqueue_create_after(
            Duration::from_secs(2),
            Err(PostsError::Transport("offline".to_string())),
        );
        let draft = PostDraft::new("t", "b", 1).unwrap();

        let start = tokio::time::Instant::now();
        let result = client.create(&draft).await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(result, Err(PostsError::Transport("offline".to_string())));
    }
}
