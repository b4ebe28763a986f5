//! Posts feed: a request-lifecycle state container over a remote posts
//! collection.
//!
//! The feed keeps an ordered list of posts together with the progress of two
//! independent operations, fetching a page and creating a post. It
//! demonstrates:
//!
//! - A pure lifecycle reducer (`PostsReducer::apply_event`)
//! - Remote calls run as effects whose outcomes come back as events
//! - Overlapping operations with independent statuses and one error slot
//! - A dyn-compatible client trait with HTTP and scripted implementations
//! - Testing with `ReducerTest`, the mock client, and `wiremock`
//!
//! # Quick Start
//!
//! ```no_run
//! use posts::{PostsConfig, PostsFeed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let feed = PostsFeed::connect(&PostsConfig::from_env()?)?;
//!
//! // Refresh and wait for the outcome to land
//! let mut handle = feed.trigger_fetch().await?;
//! handle.wait().await;
//!
//! // Submit a post
//! let mut handle = feed.trigger_add("Hello", "First post").await?;
//! handle.wait().await;
//!
//! for post in feed.items().await {
//!     println!("{} {}", post.id, post.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod feed;
pub mod http;
pub mod ids;
pub mod mock;
pub mod orchestrator;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use client::PostsClient;
pub use config::{ConfigError, PostsConfig};
pub use environment::PostsEnvironment;
pub use error::{Operation, PostsError};
pub use feed::{PostsFeed, PostsStore};
pub use http::HttpPostsClient;
pub use ids::TimestampIdGenerator;
pub use mock::MockPostsClient;
pub use reducer::{reduce, PostsReducer};
pub use types::{DraftError, Post, PostDraft, PostId, PostsAction, PostsState, RequestStatus};
