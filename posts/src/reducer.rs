//! Reducer for the posts feed.
//!
//! Lifecycle events are applied through [`PostsReducer::apply_event`], the
//! pure transition table. Commands apply their start event right away and
//! hand the remote call to the runtime as an effect; the terminal event comes
//! back through the store.

use crate::environment::PostsEnvironment;
use crate::orchestrator;
use crate::types::{PostDraft, PostsAction, PostsState, RequestStatus};
use postfeed_core::{async_effect, delay, effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Reducer for the posts feed
#[derive(Clone, Copy, Debug, Default)]
pub struct PostsReducer;

impl PostsReducer {
    /// Creates a new `PostsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies a lifecycle event to state
    ///
    /// Commands are not lifecycle events and leave state unchanged.
    pub fn apply_event(state: &mut PostsState, action: &PostsAction) {
        match action {
            PostsAction::FetchStarted => {
                state.fetch_status = RequestStatus::Loading;
                state.error = None;
            },
            PostsAction::FetchSucceeded { posts } => {
                state.fetch_status = RequestStatus::Succeeded;
                state.items.clone_from(posts);
                state.error = None;
            },
            PostsAction::FetchFailed { message } => {
                state.fetch_status = RequestStatus::Failed;
                state.error = Some(message.clone());
            },
            PostsAction::AddStarted => {
                state.add_status = RequestStatus::Loading;
                state.error = None;
            },
            PostsAction::AddSucceeded { post } => {
                state.add_status = RequestStatus::Succeeded;
                state.items.insert(0, post.clone());
                state.error = None;
            },
            PostsAction::AddFailed { message } => {
                state.add_status = RequestStatus::Failed;
                state.error = Some(message.clone());
            },
            PostsAction::ErrorCleared => {
                state.error = None;
            },
            // Commands are not applied to state
            PostsAction::FetchPosts | PostsAction::AddPost { .. } | PostsAction::ClearError => {},
        }
    }

    fn start(state: &mut PostsState, event: &PostsAction) {
        tracing::debug!(event = event.name(), "Applying start event");
        Self::apply_event(state, event);
    }
}

/// Applies `action` to a copy of `state`
///
/// By-value form of [`PostsReducer::apply_event`]; anything that is not a
/// lifecycle event returns a state equal to the input.
#[must_use]
pub fn reduce(state: &PostsState, action: &PostsAction) -> PostsState {
    let mut next = state.clone();
    PostsReducer::apply_event(&mut next, action);
    next
}

impl Reducer for PostsReducer {
    type State = PostsState;
    type Action = PostsAction;
    type Environment = PostsEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), "Reducing posts action");

        match action {
            // ========== Commands ==========
            PostsAction::FetchPosts => {
                Self::start(state, &PostsAction::FetchStarted);

                let env = env.clone();
                smallvec![async_effect! {
                    Some(orchestrator::run_fetch(&env).await)
                }]
            },

            PostsAction::AddPost { title, body } => {
                let draft = match PostDraft::new(&title, &body, env.user_id) {
                    Ok(draft) => draft,
                    Err(error) => {
                        tracing::debug!(error = %error, "Rejected post draft");
                        // The create in flight still owns add_status
                        if state.is_adding() {
                            state.error = Some(error.to_string());
                        } else {
                            Self::apply_event(
                                state,
                                &PostsAction::AddFailed {
                                    message: error.to_string(),
                                },
                            );
                        }
                        return SmallVec::new();
                    },
                };

                Self::start(state, &PostsAction::AddStarted);

                let env = env.clone();
                smallvec![async_effect! {
                    Some(orchestrator::run_add(&env, draft).await)
                }]
            },

            PostsAction::ClearError => {
                Self::apply_event(state, &PostsAction::ErrorCleared);
                SmallVec::new()
            },

            // ========== Events ==========
            PostsAction::AddSucceeded { .. } => {
                Self::apply_event(state, &action);

                match env.error_clear_delay {
                    Some(duration) => smallvec![delay! {
                        duration: duration,
                        action: PostsAction::ErrorCleared
                    }],
                    None => SmallVec::new(),
                }
            },

            PostsAction::FetchStarted
            | PostsAction::FetchSucceeded { .. }
            | PostsAction::FetchFailed { .. }
            | PostsAction::AddStarted
            | PostsAction::AddFailed { .. }
            | PostsAction::ErrorCleared => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
