//! State and actions of the events view.

use crate::auth::Viewer;
use crate::form::{EventForm, FormField};
use easy_event_core::effect::EffectId;
use easy_event_graphql::{Booking, Event, GraphQlError};
use std::fmt;

/// In-flight `events` query
pub const FETCH_EVENTS: EffectId = EffectId::new("events.fetch");
/// In-flight `createEvent` mutations
pub const CREATE_EVENT: EffectId = EffectId::new("events.create");
/// In-flight `bookEvent` mutations
pub const BOOK_EVENT: EffectId = EffectId::new("events.book");

/// Network operation a [`ViewError`] came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Listing events
    LoadEvents,
    /// Creating an event
    CreateEvent,
    /// Booking an event
    BookEvent,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadEvents => "load events",
            Self::CreateEvent => "create event",
            Self::BookEvent => "book event",
        })
    }
}

/// A failure shown to the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    /// What was attempted
    pub operation: Operation,
    /// What went wrong
    pub message: String,
}

impl ViewError {
    pub(crate) fn new(operation: Operation, error: &GraphQlError) -> Self {
        Self {
            operation,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not {}: {}", self.operation, self.message)
    }
}

/// State of the events view
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventsState {
    /// The view is mounted; results are dropped while false
    pub active: bool,
    /// The list request is in flight
    pub is_loading: bool,
    /// Events in server order, plus locally created ones at the end
    pub events: Vec<Event>,
    /// The create modal is open
    pub creating: bool,
    /// Identifier of the event shown in the detail modal
    pub selected_event: Option<String>,
    /// Contents of the create modal
    pub form: EventForm,
    /// Session as last reported by the auth store
    pub viewer: Option<Viewer>,
    /// Last failure, shown as a banner
    pub error: Option<ViewError>,
    /// Last booking acknowledgement
    pub notice: Option<String>,
}

impl EventsState {
    /// The event shown in the detail modal
    #[must_use]
    pub fn selected(&self) -> Option<&Event> {
        let id = self.selected_event.as_deref()?;
        self.find(id)
    }

    /// Look an event up by identifier
    #[must_use]
    pub fn find(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Whether the create or detail modal is open
    #[must_use]
    pub const fn modal_open(&self) -> bool {
        self.creating || self.selected_event.is_some()
    }

    /// Whether the current viewer created `event`
    #[must_use]
    pub fn is_own(&self, event: &Event) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|v| event.is_owned_by(&v.user_id))
    }
}

/// Actions of the events view
#[derive(Clone, Debug)]
pub enum EventsAction {
    // ========== Lifecycle ==========
    /// The view was mounted: fetch the list
    Activated,
    /// The view was unmounted: cancel in-flight requests
    Deactivated,
    /// Fetch the list again
    Refresh,
    /// The auth store changed
    SessionChanged {
        /// Current session, if any
        viewer: Option<Viewer>,
    },

    // ========== User intents ==========
    /// Open the create modal
    StartCreate,
    /// Type into the create modal
    EditForm {
        /// Edited field
        field: FormField,
        /// New value
        value: String,
    },
    /// Confirm the create modal
    ConfirmCreate,
    /// Close whichever modal is open
    Cancel,
    /// Open the detail modal of an event
    ViewDetails {
        /// Event to show
        event_id: String,
    },
    /// Confirm the detail modal
    ConfirmBooking,
    /// Hide the error banner
    DismissError,
    /// Hide the booking notice
    DismissNotice,

    // ========== Results ==========
    /// The list arrived
    EventsLoaded {
        /// Events in server order
        events: Vec<Event>,
    },
    /// The list request failed
    EventsLoadFailed {
        /// What went wrong
        error: GraphQlError,
    },
    /// An event was created
    EventCreated {
        /// The new event, owned by the creator
        event: Event,
    },
    /// Creating an event failed
    CreateFailed {
        /// What went wrong
        error: GraphQlError,
    },
    /// A booking was made
    EventBooked {
        /// Booked event
        event_id: String,
        /// Server acknowledgement
        booking: Booking,
    },
    /// Booking failed
    BookingFailed {
        /// Event that could not be booked
        event_id: String,
        /// What went wrong
        error: GraphQlError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use easy_event_graphql::Creator;

    fn event(id: &str, creator: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            description: String::new(),
            date: "2024-01-01".to_string(),
            price: 1.0,
            creator: Creator {
                id: creator.to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn selected_looks_up_by_id() {
        let state = EventsState {
            events: vec![event("1", "u1"), event("2", "u2")],
            selected_event: Some("2".to_string()),
            ..EventsState::default()
        };
        assert_eq!(state.selected().map(|e| e.title.as_str()), Some("Event 2"));
        assert!(state.modal_open());
    }

    #[test]
    fn ownership_needs_a_viewer() {
        let mut state = EventsState::default();
        let owned = event("1", "u1");
        assert!(!state.is_own(&owned));

        state.viewer = Some(Viewer {
            token: "t".to_string(),
            user_id: "u1".to_string(),
        });
        assert!(state.is_own(&owned));
    }

    #[test]
    fn view_error_names_operation() {
        let error = ViewError::new(
            Operation::BookEvent,
            &GraphQlError::Status {
                status: 500,
                body: "Failed!".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Could not book event: Unexpected status 500: Failed!"
        );
    }
}
