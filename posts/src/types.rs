//! Domain types for the posts feed.
//!
//! A feed is an ordered list of posts plus the progress of the two remote
//! operations that change it: fetching a page and creating a post. Each
//! operation has its own [`RequestStatus`]; both share one error slot.

use postfeed_macros::Action;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author id used for every post created from this client
pub const DEFAULT_USER_ID: u64 = 1;

/// Identifier of a post
///
/// Server-assigned for fetched posts, client-assigned (timestamp derived) for
/// posts created locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Creates a `PostId` from its raw value
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single post as the remote collection represents it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier within the feed
    pub id: PostId,
    /// Display title
    pub title: String,
    /// Display body
    pub body: String,
    /// Author reference
    pub user_id: u64,
}

impl Post {
    /// Creates a post
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>, user_id: u64) -> Self {
        Self {
            id: PostId::new(id),
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// Returns the same post under a different id
    #[must_use]
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }
}

/// Why a draft was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Title is empty after trimming
    #[error("title is required")]
    EmptyTitle,
    /// Body is empty after trimming
    #[error("body is required")]
    EmptyBody,
    /// Both fields are empty after trimming
    #[error("title and body are required")]
    EmptyTitleAndBody,
}

/// A validated post waiting to be created
///
/// Only [`PostDraft::new`] builds one, so a draft with an empty title or body
/// cannot reach the remote collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    title: String,
    body: String,
    user_id: u64,
}

impl PostDraft {
    /// Trims both fields and rejects empty ones
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] naming the empty field(s).
    pub fn new(title: &str, body: &str, user_id: u64) -> Result<Self, DraftError> {
        let title = title.trim();
        let body = body.trim();

        match (title.is_empty(), body.is_empty()) {
            (true, true) => Err(DraftError::EmptyTitleAndBody),
            (true, false) => Err(DraftError::EmptyTitle),
            (false, true) => Err(DraftError::EmptyBody),
            (false, false) => Ok(Self {
                title: title.to_string(),
                body: body.to_string(),
                user_id,
            }),
        }
    }

    /// Trimmed title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed body
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Author reference
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }
}

/// Progress of one remote operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Never started
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Last request succeeded
    Succeeded,
    /// Last request failed
    Failed,
}

impl RequestStatus {
    /// True while a request is in flight
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True after the last request failed
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// State of the posts feed
///
/// `items` is newest-first. Only the reducer mutates it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsState {
    /// Posts in display order
    pub items: Vec<Post>,
    /// Progress of the list-fetch operation
    pub fetch_status: RequestStatus,
    /// Progress of the create operation
    pub add_status: RequestStatus,
    /// Most recent failure message from either operation
    pub error: Option<String>,
}

impl PostsState {
    /// Creates the initial state: empty feed, both operations idle, no error
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            fetch_status: RequestStatus::Idle,
            add_status: RequestStatus::Idle,
            error: None,
        }
    }

    /// Number of posts in the feed
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the feed has no posts
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a post by id
    #[must_use]
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.items.iter().find(|post| post.id == id)
    }

    /// Checks if a post with this id is in the feed
    #[must_use]
    pub fn contains(&self, id: PostId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<PostId> {
        self.items.iter().map(|post| post.id).collect()
    }

    /// A list fetch is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetch_status.is_loading()
    }

    /// A create is in flight; submit controls should be disabled
    #[must_use]
    pub const fn is_adding(&self) -> bool {
        self.add_status.is_loading()
    }

    /// The last list fetch failed
    #[must_use]
    pub const fn fetch_failed(&self) -> bool {
        self.fetch_status.is_failed()
    }

    /// The last create failed
    #[must_use]
    pub const fn add_failed(&self) -> bool {
        self.add_status.is_failed()
    }
}

/// Actions for the posts feed
///
/// Commands come from the consumer. Events describe request lifecycle
/// transitions; the orchestrator produces the terminal ones.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostsAction {
    // ========== Commands ==========
    /// Command: refresh the feed from the remote collection
    #[command]
    FetchPosts,

    /// Command: create a post from raw form input
    #[command]
    AddPost {
        /// Title as typed
        title: String,
        /// Body as typed
        body: String,
    },

    /// Command: dismiss the current error
    #[command]
    ClearError,

    // ========== Events ==========
    /// Event: list fetch started
    #[event]
    FetchStarted,

    /// Event: list fetch returned a normalized (newest-first) page
    #[event]
    FetchSucceeded {
        /// Page of posts, already ordered by descending id
        posts: Vec<Post>,
    },

    /// Event: list fetch failed
    #[event]
    FetchFailed {
        /// Human-readable cause
        message: String,
    },

    /// Event: create started
    #[event]
    AddStarted,

    /// Event: create succeeded
    #[event]
    AddSucceeded {
        /// Created post carrying its client-assigned id
        post: Post,
    },

    /// Event: create failed
    #[event]
    AddFailed {
        /// Human-readable cause
        message: String,
    },

    /// Event: error slot cleared
    #[event]
    ErrorCleared,
}

impl PostsAction {
    /// True for the terminal events of a list fetch
    #[must_use]
    pub const fn is_fetch_outcome(&self) -> bool {
        matches!(self, Self::FetchSucceeded { .. } | Self::FetchFailed { .. })
    }

    /// True for the terminal events of a create
    #[must_use]
    pub const fn is_add_outcome(&self) -> bool {
        matches!(self, Self::AddSucceeded { .. } | Self::AddFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_uses_wire_field_names() {
        let json = r#"{"userId":1,"id":3,"title":"t","body":"b"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post, Post::new(3, "t", "b", 1));

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["id"], 3);
    }

    #[test]
    fn draft_trims_fields() {
        let draft = PostDraft::new("  Hello ", "\tWorld\n", DEFAULT_USER_ID).unwrap();
        assert_eq!(draft.title(), "Hello");
        assert_eq!(draft.body(), "World");
        assert_eq!(draft.user_id(), 1);
    }

    #[test]
    fn draft_rejects_blank_fields() {
        assert_eq!(PostDraft::new("  ", "body", 1), Err(DraftError::EmptyTitle));
        assert_eq!(PostDraft::new("title", "", 1), Err(DraftError::EmptyBody));
        assert_eq!(PostDraft::new(" ", "\n", 1), Err(DraftError::EmptyTitleAndBody));
    }

    #[test]
    fn draft_serializes_for_create() {
        let draft = PostDraft::new("x", "y", 1).unwrap();
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value, serde_json::json!({"title": "x", "body": "y", "userId": 1}));
    }

    #[test]
    fn initial_state_is_idle_and_empty() {
        let state = PostsState::new();
        assert!(state.is_empty());
        assert_eq!(state.fetch_status, RequestStatus::Idle);
        assert_eq!(state.add_status, RequestStatus::Idle);
        assert_eq!(state.error, None);
        assert_eq!(state, PostsState::default());
    }

    #[test]
    fn request_status_display() {
        assert_eq!(RequestStatus::Idle.to_string(), "idle");
        assert_eq!(RequestStatus::Loading.to_string(), "loading");
        assert_eq!(RequestStatus::Succeeded.to_string(), "succeeded");
        assert_eq!(RequestStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn action_classification() {
        assert!(PostsAction::FetchPosts.is_command());
        assert!(PostsAction::ClearError.is_command());
        assert!(PostsAction::FetchStarted.is_event());
        assert!(PostsAction::ErrorCleared.is_event());
        assert_eq!(PostsAction::AddStarted.name(), "addStarted");
        assert!(PostsAction::FetchFailed {
            message: String::new()
        }
        .is_fetch_outcome());
        assert!(!PostsAction::FetchStarted.is_fetch_outcome());
        assert!(PostsAction::AddSucceeded {
            post: Post::new(1, "a", "b", 1)
        }
        .is_add_outcome());
    }
}
