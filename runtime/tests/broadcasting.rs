//! Integration tests for Store action broadcasting and effect tracking
//!
//! Views wait for result actions (`send_and_wait_for`), follow chains of
//! feedback actions (`send_cascading`) and stop in-flight requests with
//! `Effect::Cancel`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use easy_event_core::{SmallVec, effect::Effect, effect::EffectId, reducer::Reducer, smallvec};
use easy_event_runtime::{Store, StoreConfig, StoreError};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

const PAGES: EffectId = EffectId::new("pages");

/// Pages are fetched one after another until `last`
#[derive(Debug, Clone, PartialEq)]
enum PageAction {
    Fetch { page: u32, last: u32 },
    Fetched { page: u32, last: u32 },
    Done { pages: u32 },
    Stop,
    Ping { id: u64 },
    Pong { id: u64 },
}

#[derive(Debug, Clone, Default)]
struct PageState {
    fetched: Vec<u32>,
}

#[derive(Clone)]
struct TestEnvironment {
    latency: Duration,
}

#[derive(Clone)]
struct PageReducer;

impl Reducer for PageReducer {
    type State = PageState;
    type Action = PageAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PageAction::Fetch { page, last } => {
                let latency = env.latency;
                smallvec![
                    Effect::Future(Box::pin(async move {
                        tokio::time::sleep(latency).await;
                        Some(PageAction::Fetched { page, last })
                    }))
                    .cancellable(PAGES)
                ]
            },

            PageAction::Fetched { page, last } => {
                state.fetched.push(page);
                let next = if page < last {
                    PageAction::Fetch {
                        page: page + 1,
                        last,
                    }
                } else {
                    PageAction::Done { pages: page }
                };
                smallvec![Effect::Future(Box::pin(async move { Some(next) }))]
            },

            PageAction::Stop => smallvec![Effect::Cancel(PAGES)],

            PageAction::Ping { id } => {
                smallvec![Effect::Future(Box::pin(async move {
                    Some(PageAction::Pong { id })
                }))]
            },

            PageAction::Done { .. } | PageAction::Pong { .. } => SmallVec::new(),
        }
    }
}

fn store(latency_ms: u64) -> Store<PageState, PageAction, TestEnvironment, PageReducer> {
    Store::new(
        PageState::default(),
        PageReducer,
        TestEnvironment {
            latency: Duration::from_millis(latency_ms),
        },
    )
}

#[tokio::test]
async fn lagging_observer_keeps_latest_actions() {
    let store = Store::with_config(
        PageState::default(),
        PageReducer,
        TestEnvironment {
            latency: Duration::ZERO,
        },
        StoreConfig {
            broadcast_capacity: 2,
        },
    );
    let mut observer = store.subscribe_actions();

    let mut handle = store
        .send_cascading(PageAction::Fetch { page: 1, last: 2 })
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    // Fetched 1, Fetch 2, Fetched 2, Done: the first two were overwritten
    assert!(matches!(
        observer.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Lagged(2))
    ));
    assert_eq!(observer.try_recv().unwrap(), PageAction::Fetched { page: 2, last: 2 });
    assert_eq!(observer.try_recv().unwrap(), PageAction::Done { pages: 2 });
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn wait_for_immediate_result() {
    let store = store(0);

    let result = store
        .send_and_wait_for(
            PageAction::Ping { id: 7 },
            |action| matches!(action, PageAction::Pong { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, PageAction::Pong { id: 7 });
}

#[tokio::test]
async fn wait_for_end_of_chain() {
    let store = store(10);

    let result = store
        .send_and_wait_for(
            PageAction::Fetch { page: 1, last: 3 },
            |action| matches!(action, PageAction::Done { .. }),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

    assert_eq!(result, PageAction::Done { pages: 3 });
    assert_eq!(store.state(|s| s.fetched.clone()).await, vec![1, 2, 3]);
}

#[tokio::test]
async fn wait_for_times_out() {
    let store = store(200);

    let result = store
        .send_and_wait_for(
            PageAction::Fetch { page: 1, last: 1 },
            |action| matches!(action, PageAction::Done { .. }),
            Duration::from_millis(30),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn concurrent_waiters_get_their_own_results() {
    let store = Arc::new(store(0));

    let mut tasks = Vec::new();
    for id in 1..=5 {
        let store = Arc::clone(&store);
        tasks.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    PageAction::Ping { id },
                    move |action| matches!(action, PageAction::Pong { id: got } if *got == id),
                    Duration::from_secs(1),
                )
                .await
        }));
    }

    for (id, task) in (1..=5).zip(tasks) {
        assert_eq!(task.await.unwrap().unwrap(), PageAction::Pong { id });
    }
}

#[tokio::test]
async fn cascading_handle_covers_feedback_effects() {
    let store = store(10);

    let mut handle = store
        .send_cascading(PageAction::Fetch { page: 1, last: 3 })
        .await
        .unwrap();
    handle.wait_with_timeout(Duration::from_secs(2)).await.unwrap();

    assert_eq!(store.state(|s| s.fetched.len()).await, 3);
}

#[tokio::test]
async fn cancel_stops_the_chain() {
    let store = store(50);
    let mut observer = store.subscribe_actions();

    store
        .send(PageAction::Fetch { page: 1, last: 3 })
        .await
        .unwrap();
    assert!(store.is_effect_running(PAGES));

    store.send(PageAction::Stop).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(store.state(|s| s.fetched.is_empty()).await);
    assert!(!store.is_effect_running(PAGES));
    assert!(observer.try_recv().is_err(), "no result after cancellation");
}

#[tokio::test]
async fn shutdown_cancels_in_flight_requests() {
    let store = store(10_000);

    store
        .send(PageAction::Fetch { page: 1, last: 1 })
        .await
        .unwrap();

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert!(store.state(|s| s.fetched.is_empty()).await);
    assert!(matches!(
        store.send(PageAction::Ping { id: 1 }).await,
        Err(StoreError::ShutdownInProgress)
    ));
}
