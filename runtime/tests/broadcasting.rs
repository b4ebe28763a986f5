//! Integration tests for Store action broadcasting and change notification
//!
//! Observers learn about effect results through the action broadcast and
//! about every state change through the revision channel.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use postfeed_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use postfeed_runtime::{Store, StoreError};
use std::time::Duration;
use tokio::sync::broadcast;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum LoadAction {
    /// Start a load that succeeds after `steps` hops
    Load { id: u64, steps: u32 },
    /// Intermediate hop
    Progressed { id: u64, remaining: u32 },
    /// Terminal success
    Loaded { id: u64 },
    /// Start a load that fails
    LoadBroken { id: u64 },
    /// Terminal failure
    LoadFailed { id: u64, message: String },
}

#[derive(Debug, Clone, Default)]
struct LoadState {
    loaded: Vec<u64>,
    hops: u32,
    last_error: Option<String>,
}

#[derive(Clone)]
struct LoadEnvironment;

#[derive(Clone)]
struct LoadReducer;

impl Reducer for LoadReducer {
    type State = LoadState;
    type Action = LoadAction;
    type Environment = LoadEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LoadAction::Load { id, steps } => smallvec![Effect::Future(Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(LoadAction::Progressed { id, remaining: steps })
            }))],
            LoadAction::Progressed { id, remaining } => {
                state.hops += 1;
                if remaining > 1 {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(LoadAction::Progressed {
                            id,
                            remaining: remaining - 1,
                        })
                    }))]
                } else {
                    smallvec![Effect::Future(Box::pin(async move {
                        Some(LoadAction::Loaded { id })
                    }))]
                }
            },
            LoadAction::Loaded { id } => {
                state.loaded.push(id);
                SmallVec::new()
            },
            LoadAction::LoadBroken { id } => smallvec![Effect::Future(Box::pin(async move {
                Some(LoadAction::LoadFailed {
                    id,
                    message: "backend unavailable".to_string(),
                })
            }))],
            LoadAction::LoadFailed { message, .. } => {
                state.last_error = Some(message);
                SmallVec::new()
            },
        }
    }
}

fn is_terminal(action: &LoadAction, id: u64) -> bool {
    matches!(action,
        LoadAction::Loaded { id: loaded } | LoadAction::LoadFailed { id: loaded, .. }
            if *loaded == id
    )
}

/// Receive broadcast actions until the terminal one for `id`
async fn recv_terminal(rx: &mut broadcast::Receiver<LoadAction>, id: u64) -> LoadAction {
    loop {
        let action = rx.recv().await.unwrap();
        if is_terminal(&action, id) {
            return action;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn terminal_success_is_applied_when_received() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut rx = store.subscribe_actions();

    store.send(LoadAction::Load { id: 1, steps: 3 }).await.unwrap();
    let result = recv_terminal(&mut rx, 1).await;

    assert_eq!(result, LoadAction::Loaded { id: 1 });
    assert_eq!(store.state(|s| s.loaded.clone()).await, vec![1]);
    assert_eq!(store.state(|s| s.hops).await, 3);
}

#[tokio::test]
async fn terminal_failure_is_applied_when_received() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut rx = store.subscribe_actions();

    store.send(LoadAction::LoadBroken { id: 7 }).await.unwrap();
    let result = recv_terminal(&mut rx, 7).await;

    assert_eq!(
        result,
        LoadAction::LoadFailed {
            id: 7,
            message: "backend unavailable".to_string()
        }
    );
    assert_eq!(
        store.state(|s| s.last_error.clone()).await.as_deref(),
        Some("backend unavailable")
    );
}

#[tokio::test(start_paused = true)]
async fn waiting_on_a_slow_load_times_out() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);

    let mut handle = store.send(LoadAction::Load { id: 9, steps: 1 }).await.unwrap();
    let result = handle.wait_with_timeout(Duration::from_millis(1)).await;

    assert!(matches!(result, Err(StoreError::Timeout)));
    assert!(store.state(|s| s.loaded.is_empty()).await);

    handle.wait().await;
    assert_eq!(store.state(|s| s.loaded.clone()).await, vec![9]);
}

#[tokio::test]
async fn direct_sends_are_not_broadcast() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut rx = store.subscribe_actions();

    store.send(LoadAction::Loaded { id: 3 }).await.unwrap();

    assert!(rx.try_recv().is_err());
    assert_eq!(store.state(|s| s.loaded.clone()).await, vec![3]);
}

#[tokio::test]
async fn subscribers_see_every_effect_action_in_order() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(LoadAction::Load { id: 5, steps: 2 }).await.unwrap();
    handle.wait().await;

    assert_eq!(
        rx.recv().await.unwrap(),
        LoadAction::Progressed { id: 5, remaining: 2 }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        LoadAction::Progressed { id: 5, remaining: 1 }
    );
    assert_eq!(rx.recv().await.unwrap(), LoadAction::Loaded { id: 5 });
    assert!(rx.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_loads_are_broadcast_in_application_order() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut rx = store.subscribe_actions();

    let mut handles = vec![];
    for id in 1..=5 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.send(LoadAction::Load { id, steps: 2 }).await
        }));
    }

    let mut received = vec![];
    while received.len() < 5 {
        if let LoadAction::Loaded { id } = rx.recv().await.unwrap() {
            assert!(store.state(|s| s.loaded.contains(&id)).await);
            received.push(id);
        }
    }

    for handle in handles {
        handle.await.unwrap().unwrap().wait().await;
    }
    assert_eq!(store.state(|s| s.loaded.clone()).await, received);
}

#[tokio::test]
async fn change_notifications_follow_application_order() {
    let store = Store::new(LoadState::default(), LoadReducer, LoadEnvironment);
    let mut changes = store.subscribe_changes();

    let mut handle = store.send(LoadAction::LoadBroken { id: 2 }).await.unwrap();
    handle.wait().await;

    // LoadBroken, then the LoadFailed it fed back
    assert_eq!(*changes.borrow_and_update(), 2);
    assert_eq!(
        store.state(|s| s.last_error.clone()).await.as_deref(),
        Some("backend unavailable")
    );
}
