//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use easy_event_core::async_effect;
///
/// async_effect! {
///     let events = api.events().await.ok()?;
///     Some(EventsAction::EventsLoaded { events })
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
/// use easy_event_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(3600),
///     action: AuthAction::SessionExpired { token }
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

/// Wrap an effect so it can be cancelled with `Effect::Cancel(id)`
///
/// # Example
///
/// ```rust,ignore
/// use easy_event_core::cancellable;
///
/// cancellable! {
///     id: FETCH_EVENTS,
///     effect: env.list_events()
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Loaded { count: usize },
        Expired,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { count: 3 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::Expired
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn test_cancellable_macro() {
        let id = EffectId::new("expiry");
        let effect = cancellable! {
            id: id,
            effect: delay! {
                duration: Duration::from_secs(1),
                action: TestAction::Expired
            }
        };

        assert_eq!(effect.cancellation_id(), Some(id));
    }
}
