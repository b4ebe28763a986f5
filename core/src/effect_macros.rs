//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when a reducer hands async work or a
//! deferred action to the runtime.

/// Create an `Effect::Future` from an async block
///
/// The block must evaluate to `Option<Action>`; `Some` is fed back into the
/// store.
///
/// # Example
///
/// ```rust,ignore
/// use postfeed_core::async_effect;
///
/// async_effect! {
///     let posts = client.list(10).await;
///     Some(PostsAction::FetchSucceeded { posts })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use postfeed_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(3),
///     action: PostsAction::ClearError
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
