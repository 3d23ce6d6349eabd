//! Production environment: the GraphQL client and the wall clock.

use crate::auth::{AuthAction, AuthEnvironment, Password, Viewer};
use crate::events::{EventsAction, EventsEnvironment};
use chrono::{DateTime, Utc};
use easy_event_core::async_effect;
use easy_event_core::effect::Effect;
use easy_event_core::environment::{Clock, SystemClock};
use easy_event_graphql::{EventInput, GraphQlClient};
use std::sync::Arc;

/// Environment shared by the auth and events stores
#[derive(Clone)]
pub struct GraphQlEnvironment {
    client: Arc<GraphQlClient>,
    clock: Arc<dyn Clock>,
}

impl GraphQlEnvironment {
    /// Environment using `client` and the system clock
    #[must_use]
    pub fn new(client: GraphQlClient) -> Self {
        Self::with_clock(client, Arc::new(SystemClock))
    }

    /// Environment using `client` and `clock`
    #[must_use]
    pub fn with_clock(client: GraphQlClient, clock: Arc<dyn Clock>) -> Self {
        Self {
            client: Arc::new(client),
            clock,
        }
    }
}

impl std::fmt::Debug for GraphQlEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlEnvironment")
            .field("endpoint", &self.client.endpoint())
            .finish_non_exhaustive()
    }
}

impl AuthEnvironment for GraphQlEnvironment {
    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn sign_in(&self, email: String, password: Password) -> Effect<AuthAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            Some(match client.login(&email, password.expose()).await {
                Ok(auth) => AuthAction::SignInSucceeded { auth },
                Err(error) => AuthAction::SignInFailed { error },
            })
        }
    }
}

impl EventsEnvironment for GraphQlEnvironment {
    fn list_events(&self) -> Effect<EventsAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            Some(match client.events().await {
                Ok(events) => EventsAction::EventsLoaded { events },
                Err(error) => EventsAction::EventsLoadFailed { error },
            })
        }
    }

    fn create_event(&self, viewer: Viewer, input: EventInput) -> Effect<EventsAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            let result = client.create_event(&viewer.token, &input).await;
            Some(match result {
                Ok(created) => EventsAction::EventCreated {
                    event: created.owned_by(viewer.user_id),
                },
                Err(error) => EventsAction::CreateFailed { error },
            })
        }
    }

    fn book_event(&self, viewer: Viewer, event_id: String) -> Effect<EventsAction> {
        let client = Arc::clone(&self.client);
        async_effect! {
            let result = client.book_event(&viewer.token, &event_id).await;
            Some(match result {
                Ok(booking) => EventsAction::EventBooked { event_id, booking },
                Err(error) => EventsAction::BookingFailed { event_id, error },
            })
        }
    }
}
