//! # Easy Event Testing
//!
//! Testing utilities and helpers for Easy Event features.
//!
//! This crate provides:
//! - Deterministic clocks
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - Effect assertions and a helper that runs effects without a store
//!
//! ## Example
//!
//! ```ignore
//! use easy_event_testing::{helpers::run_effects, test_clock};
//!
//! #[tokio::test]
//! async fn login_schedules_expiry() {
//!     let env = AuthEnvironment::new(test_clock());
//!     let mut state = AuthState::default();
//!     let effects = AuthReducer.reduce(&mut state, login_action(), &env);
//!
//!     assert!(state.token.is_some());
//!     assert!(run_effects(effects).await.is_empty());
//! }
//! ```

use chrono::{DateTime, Utc};
use easy_event_core::environment::Clock;


/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use easy_event_testing::mocks::FixedClock;
    /// use easy_event_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Start the clock at `time`
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities.
pub mod helpers {
    use easy_event_core::effect::Effect;
    use futures::future::BoxFuture;

    /// Execute effects without a store and collect the actions they produce
    ///
    /// `Parallel` and `Sequential` effects run in order, `Delay` yields its
    /// action immediately and `Cancel` is ignored. Produced actions are not
    /// fed back into any reducer.
    pub async fn run_effects<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run_effect(effect).await);
        }
        actions
    }

    fn run_effect<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        Box::pin(async move {
            match effect {
                Effect::None | Effect::Cancel(_) => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Delay { action, .. } => vec![*action],
                Effect::Cancellable { effect, .. } => run_effect(*effect).await,
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(run_effect(effect).await);
                    }
                    actions
                },
            }
        })
    }

    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from several tests; only the first call installs it.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, ManualClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::helpers::run_effects;
    use super::*;
    use easy_event_core::effect::{Effect, EffectId};
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_manual_clock_advances_all_clones() {
        let clock = ManualClock::new(test_clock().now());
        let shared = clock.clone();

        shared.advance(chrono::Duration::hours(1));

        assert_eq!(clock.now() - test_clock().now(), chrono::Duration::hours(1));
    }

    #[tokio::test]
    async fn test_run_effects_flattens_nested_effects() {
        let effects = vec![
            Effect::Future(Box::pin(async { Some(1) })),
            Effect::Parallel(vec![
                Effect::Delay {
                    duration: Duration::from_secs(60),
                    action: Box::new(2),
                },
                Effect::Future(Box::pin(async { None })),
            ])
            .cancellable(EffectId::new("nested")),
            Effect::Cancel(EffectId::new("nested")),
            Effect::None,
        ];

        assert_eq!(run_effects(effects).await, vec![1, 2]);
    }
}
