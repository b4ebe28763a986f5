//! Consumer-facing handle on a posts feed.
//!
//! [`PostsFeed`] owns the [`Store`] that holds the single [`PostsState`] for a
//! session. Commands go in through `trigger_*`; readers take snapshots or
//! subscribe to change notifications and re-read.

use crate::client::PostsClient;
use crate::config::PostsConfig;
use crate::environment::PostsEnvironment;
use crate::error::PostsError;
use crate::http::HttpPostsClient;
use crate::reducer::PostsReducer;
use crate::types::{Post, PostsAction, PostsState, RequestStatus};
use postfeed_core::environment::{Clock, SystemClock};
use postfeed_runtime::{EffectHandle, Store, StoreConfig, StoreError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Store specialised to the posts feed
pub type PostsStore = Store<PostsState, PostsAction, PostsEnvironment, PostsReducer>;

/// A posts feed session
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct PostsFeed {
    store: PostsStore,
}

impl PostsFeed {
    /// Start a feed with an empty initial state
    #[must_use]
    pub fn new(environment: PostsEnvironment) -> Self {
        Self::with_store_config(environment, StoreConfig::default())
    }

    /// Start a feed with custom store settings
    #[must_use]
    pub fn with_store_config(environment: PostsEnvironment, config: StoreConfig) -> Self {
        Self {
            store: Store::with_config(PostsState::new(), PostsReducer::new(), environment, config),
        }
    }

    /// Start a feed against `client` using the settings in `config`
    #[must_use]
    pub fn with_client(
        client: Arc<dyn PostsClient>,
        clock: Arc<dyn Clock>,
        config: &PostsConfig,
    ) -> Self {
        let environment = PostsEnvironment::from_config(client, clock, config);
        let store_config = StoreConfig::default().with_shutdown_timeout(config.shutdown_timeout());
        Self::with_store_config(environment, store_config)
    }

    /// Start a feed backed by the HTTP collection at `config.api_url`
    ///
    /// # Errors
    ///
    /// Returns [`PostsError::Transport`] if the HTTP client cannot be built.
    pub fn connect(config: &PostsConfig) -> Result<Self, PostsError> {
        let client = HttpPostsClient::new(&config.api_url, config.request_timeout())?;
        tracing::info!(api_url = client.base_url(), "Posts feed connected");
        Ok(Self::with_client(Arc::new(client), Arc::new(SystemClock), config))
    }

    /// Refresh the feed from the remote collection
    ///
    /// `fetch_status` is `Loading` once this returns. Await the handle to
    /// wait for the outcome to be applied.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn trigger_fetch(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(PostsAction::FetchPosts).await
    }

    /// Submit a new post
    ///
    /// Blank input is rejected immediately and no request is made. The
    /// validation message lands in `error`; `add_status` becomes `Failed`
    /// unless another create is still `Loading`, which keeps its status.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn trigger_add(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<EffectHandle, StoreError> {
        self.store
            .send(PostsAction::AddPost {
                title: title.into(),
                body: body.into(),
            })
            .await
    }

    /// Dismiss the current error; statuses are left as they are
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`shutdown`](Self::shutdown).
    pub async fn clear_error(&self) -> Result<EffectHandle, StoreError> {
        self.store.send(PostsAction::ClearError).await
    }

    /// Copy of the whole state
    pub async fn snapshot(&self) -> PostsState {
        self.store.state(Clone::clone).await
    }

    /// Posts in display order
    pub async fn items(&self) -> Vec<Post> {
        self.store.state(|s| s.items.clone()).await
    }

    /// Status of the list fetch
    pub async fn fetch_status(&self) -> RequestStatus {
        self.store.state(|s| s.fetch_status).await
    }

    /// Status of the create
    pub async fn add_status(&self) -> RequestStatus {
        self.store.state(|s| s.add_status).await
    }

    /// Most recent failure message
    pub async fn error(&self) -> Option<String> {
        self.store.state(|s| s.error.clone()).await
    }

    /// Change notifications
    ///
    /// The value is a revision that grows by one per applied action.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.store.subscribe_changes()
    }

    /// Terminal events as they come back from remote calls
    ///
    /// Events arrive in the order they were applied, and each is already
    /// reflected in [`snapshot`](Self::snapshot) when it is received.
    #[must_use]
    pub fn subscribe_outcomes(&self) -> broadcast::Receiver<PostsAction> {
        self.store.subscribe_actions()
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &PostsStore {
        &self.store
    }

    /// Stop accepting commands and wait for in-flight requests
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if requests are still running
    /// when the configured grace period ends.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.shutdown_within(self.store.config().default_shutdown_timeout)
            .await
    }

    /// [`shutdown`](Self::shutdown) with an explicit grace period
    ///
    /// # Errors
    ///
    /// Same as [`shutdown`](Self::shutdown).
    pub async fn shutdown_within(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}

impl std::fmt::Debug for PostsFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostsFeed")
            .field("revision", &self.store.revision())
            .field("pending_effects", &self.store.pending_effects())
            .finish()
    }
}
