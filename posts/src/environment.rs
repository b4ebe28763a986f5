//! Dependencies injected into the posts reducer

use crate::client::PostsClient;
use crate::config::PostsConfig;
use crate::ids::TimestampIdGenerator;
use postfeed_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Environment for [`PostsReducer`](crate::reducer::PostsReducer)
///
/// Cloning is cheap; the client and id generator are shared. The clock
/// passed at construction only drives id generation.
#[derive(Clone)]
pub struct PostsEnvironment {
    /// Remote posts collection
    pub client: Arc<dyn PostsClient>,
    /// Ids for created posts
    pub ids: Arc<TimestampIdGenerator>,
    /// Posts requested per fetch
    pub page_size: usize,
    /// Author id attached to created posts
    pub user_id: u64,
    /// Delay before a successful create clears the error, `None` to keep it
    pub error_clear_delay: Option<Duration>,
}

impl PostsEnvironment {
    /// Environment with default page size, user, and clear delay
    #[must_use]
    pub fn new(client: Arc<dyn PostsClient>, clock: Arc<dyn Clock>) -> Self {
        Self::from_config(client, clock, &PostsConfig::default())
    }

    /// Environment using the settings in `config`
    #[must_use]
    pub fn from_config(
        client: Arc<dyn PostsClient>,
        clock: Arc<dyn Clock>,
        config: &PostsConfig,
    ) -> Self {
        Self {
            client,
            ids: Arc::new(TimestampIdGenerator::new(clock)),
            page_size: config.page_size,
            user_id: config.user_id,
            error_clear_delay: config.error_clear_delay(),
        }
    }

    /// Set the fetch page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set (or disable) the error auto-clear delay
    #[must_use]
    pub fn with_error_clear_delay(mut self, delay: Option<Duration>) -> Self {
        self.error_clear_delay = delay;
        self
    }
}

impl std::fmt::Debug for PostsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostsEnvironment")
            .field("ids", &self.ids)
            .field("page_size", &self.page_size)
            .field("user_id", &self.user_id)
            .field("error_clear_delay", &self.error_clear_delay)
            .finish_non_exhaustive()
    }
}
