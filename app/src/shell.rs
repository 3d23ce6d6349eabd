//! The application shell: one auth store, one events store and the bridge
//! that keeps the events view informed about the session.
//!
//! ```ignore
//! let mut shell = Shell::new(GraphQlEnvironment::new(client));
//! shell.mount().await?;
//! shell.auth().send(AuthAction::SignIn { email, password }).await?;
//! println!("{}", shell.render().await);
//! shell.shutdown(Duration::from_secs(5)).await?;
//! ```

use crate::auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState};
use crate::events::{EventsAction, EventsEnvironment, EventsPageView, EventsReducer, EventsState};
use crate::navigation::Navigation;
use easy_event_runtime::{EffectHandle, Store, StoreError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Store holding the session
pub type AuthStore<E> = Store<AuthState, AuthAction, E, AuthReducer<E>>;
/// Store behind the events view
pub type EventsStore<E> = Store<EventsState, EventsAction, E, EventsReducer<E>>;

struct Bridge {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Both stores plus the session bridge
pub struct Shell<E>
where
    E: AuthEnvironment + EventsEnvironment + Clone + 'static,
{
    auth: AuthStore<E>,
    events: EventsStore<E>,
    bridge: Option<Bridge>,
}

impl<E> Shell<E>
where
    E: AuthEnvironment + EventsEnvironment + Clone + 'static,
{
    /// Create both stores, logged out and unmounted
    #[must_use]
    pub fn new(environment: E) -> Self {
        Self {
            auth: Store::new(AuthState::default(), AuthReducer::new(), environment.clone()),
            events: Store::new(EventsState::default(), EventsReducer::new(), environment),
            bridge: None,
        }
    }

    /// The auth store
    #[must_use]
    pub const fn auth(&self) -> &AuthStore<E> {
        &self.auth
    }

    /// The events store
    #[must_use]
    pub const fn events(&self) -> &EventsStore<E> {
        &self.events
    }

    /// Whether the events view is mounted
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.bridge.is_some()
    }

    /// Mount the events view
    ///
    /// Hands the current session to the view, starts forwarding session
    /// changes and fetches the list. The returned handle completes once the
    /// list request has been answered. Mounting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the stores are shutting down.
    pub async fn mount(&mut self) -> Result<EffectHandle, StoreError> {
        if self.bridge.is_some() {
            return Ok(EffectHandle::completed());
        }

        let mut changes = self.auth.observe();
        let viewer = changes.borrow_and_update().viewer();
        self.events
            .send(EventsAction::SessionChanged {
                viewer: viewer.clone(),
            })
            .await?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(forward_session(
            changes,
            self.events.clone(),
            viewer,
            cancel.clone(),
        ));
        self.bridge = Some(Bridge { cancel, task });

        let handle = self.events.send(EventsAction::Activated).await?;
        tracing::debug!("Events view mounted");
        Ok(handle)
    }

    /// Unmount the events view
    ///
    /// Stops the bridge and cancels in-flight requests; results that still
    /// arrive are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the stores are shutting down.
    pub async fn unmount(&mut self) -> Result<(), StoreError> {
        let Some(bridge) = self.bridge.take() else {
            return Ok(());
        };
        stop(bridge).await;
        self.events.send(EventsAction::Deactivated).await?;
        tracing::debug!("Events view unmounted");
        Ok(())
    }

    /// Wait until the mounted events view has seen the current session
    ///
    /// Session changes travel through the bridge task, so they reach the
    /// events store shortly after the auth store changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the view is still behind after
    /// `timeout`.
    pub async fn wait_for_session(&self, timeout: Duration) -> Result<(), StoreError> {
        if !self.is_mounted() {
            return Ok(());
        }
        let expected = self.auth.state(AuthState::viewer).await;
        let mut changes = self.events.observe();

        tokio::time::timeout(timeout, async {
            loop {
                if changes.borrow_and_update().viewer == expected {
                    return Ok(());
                }
                if changes.changed().await.is_err() {
                    return Err(StoreError::ChannelClosed);
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Text rendering of the navigation and the events view
    pub async fn render(&self) -> String {
        let navigation = self.auth.state(Navigation::render).await;
        let page = self.events.state(EventsPageView::render).await;
        format!("{navigation}\n{page}")
    }

    /// Stop the bridge and shut both stores down
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still running
    /// after `timeout`.
    pub async fn shutdown(&mut self, timeout: Duration) -> Result<(), StoreError> {
        if let Some(bridge) = self.bridge.take() {
            stop(bridge).await;
        }
        let events = self.events.shutdown(timeout).await;
        let auth = self.auth.shutdown(timeout).await;
        events.and(auth)
    }
}

async fn stop(bridge: Bridge) {
    bridge.cancel.cancel();
    if let Err(e) = bridge.task.await {
        tracing::warn!(error = %e, "Session bridge ended abnormally");
    }
}

async fn forward_session<E>(
    mut changes: watch::Receiver<AuthState>,
    events: EventsStore<E>,
    mut last: Option<crate::auth::Viewer>,
    cancel: CancellationToken,
) where
    E: EventsEnvironment + Clone + 'static,
{
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            changed = changes.changed() => {
                if changed.is_err() {
                    tracing::debug!("Auth store dropped, session bridge stopping");
                    break;
                }
                let viewer = changes.borrow_and_update().viewer();
                if viewer == last {
                    continue;
                }
                last.clone_from(&viewer);
                if let Err(e) = events.send(EventsAction::SessionChanged { viewer }).await {
                    tracing::debug!(error = %e, "Events store closed, session bridge stopping");
                    break;
                }
            }
        }
    }
}
