//! HTTP implementation of [`PostsClient`]

use crate::client::{ClientFuture, PostsClient};
use crate::error::{Operation, PostsError};
use crate::types::{Post, PostDraft};
use futures::FutureExt;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default remote collection
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// JSON-over-HTTP posts collection
///
/// - `GET {base}/posts?_limit={n}` lists posts
/// - `POST {base}/posts` creates one
#[derive(Clone, Debug)]
pub struct HttpPostsClient {
    client: Client,
    base_url: String,
}

impl HttpPostsClient {
    /// Create a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`PostsError::Transport`] if the underlying HTTP client cannot
    /// be built (TLS backend initialisation).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PostsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PostsError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>, PostsError> {
        tracing::debug!(limit, "GET /posts");

        let response = self
            .client
            .get(self.posts_url())
            .query(&[("_limit", limit)])
            .send()
            .await
            .map_err(|e| PostsError::Transport(e.to_string()))?;

        decode(response, Operation::List).await
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<Post, PostsError> {
        tracing::debug!(title = draft.title(), "POST /posts");

        let response = self
            .client
            .post(self.posts_url())
            .json(draft)
            .send()
            .await
            .map_err(|e| PostsError::Transport(e.to_string()))?;

        decode(response, Operation::Create).await
    }
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    operation: Operation,
) -> Result<T, PostsError> {
    let status = response.status();
    if !status.is_success() {
        tracing::debug!(%operation, status = status.as_u16(), "Posts collection rejected request");
        return Err(PostsError::Status {
            operation,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| PostsError::Transport(e.to_string()))?;

    serde_json::from_slice(&body).map_err(|e| PostsError::Decode(e.to_string()))
}

impl PostsClient for HttpPostsClient {
    fn list(&self, limit: usize) -> ClientFuture<'_, Vec<Post>> {
        self.list_posts(limit).boxed()
    }

    fn create<'a>(&'a self, draft: &'a PostDraft) -> ClientFuture<'a, Post> {
        self.create_post(draft).boxed()
    }
}
