//! Remote calls behind the posts commands.
//!
//! Each function performs one request against the environment's client and
//! turns the outcome into the terminal lifecycle event for that operation.
//! Start events are applied by the reducer before these run. Nothing here
//! touches state and nothing is retried.

use crate::environment::PostsEnvironment;
use crate::error::Operation;
use crate::types::{Post, PostDraft, PostsAction};
use std::collections::HashSet;

/// Fetch one page and yield `FetchSucceeded` or `FetchFailed`
pub async fn run_fetch(env: &PostsEnvironment) -> PostsAction {
    match env.client.list(env.page_size).await {
        Ok(posts) => {
            let posts = normalize_page(posts);
            tracing::info!(count = posts.len(), "Fetched posts");
            PostsAction::FetchSucceeded { posts }
        },
        Err(error) => {
            tracing::warn!(error = %error, "Fetching posts failed");
            PostsAction::FetchFailed {
                message: error.user_message(Operation::List),
            }
        },
    }
}

/// Create a post and yield `AddSucceeded` or `AddFailed`
///
/// The id echoed by the collection is replaced with one from
/// `env.ids`, taken once the create has succeeded.
pub async fn run_add(env: &PostsEnvironment, draft: PostDraft) -> PostsAction {
    match env.client.create(&draft).await {
        Ok(created) => {
            let server_id = created.id;
            let post = created.with_id(env.ids.next_id());
            tracing::info!(%server_id, id = %post.id, "Created post");
            PostsAction::AddSucceeded { post }
        },
        Err(error) => {
            tracing::warn!(error = %error, "Creating post failed");
            PostsAction::AddFailed {
                message: error.user_message(Operation::Create),
            }
        },
    }
}

/// Order a page newest-first (descending id) and drop repeated ids
///
/// When an id repeats, the first occurrence in the input is kept.
#[must_use]
pub fn normalize_page(mut posts: Vec<Post>) -> Vec<Post> {
    // Stable sort keeps the first of equal ids ahead of later ones
    posts.sort_by(|a, b| b.id.cmp(&a.id));

    let mut seen = HashSet::with_capacity(posts.len());
    posts.retain(|post| seen.insert(post.id));
    posts
}
