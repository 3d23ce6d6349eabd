//! Reducer logic for the events view.
//!
//! Every network request is wrapped in a cancellable effect keyed by its
//! operation, so `Deactivated` can stop them. Results that still arrive
//! while the view is inactive are dropped.

use super::types::{
    BOOK_EVENT, CREATE_EVENT, EventsAction, EventsState, FETCH_EVENTS, Operation, ViewError,
};
use crate::auth::Viewer;
use easy_event_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use easy_event_graphql::EventInput;
use std::fmt;
use std::marker::PhantomData;

/// Network operations of the events view, as effects
///
/// Every effect resolves to the matching result action
/// (`EventsLoaded`/`EventsLoadFailed`, `EventCreated`/`CreateFailed`,
/// `EventBooked`/`BookingFailed`).
pub trait EventsEnvironment: Send + Sync {
    /// Query `events`
    fn list_events(&self) -> Effect<EventsAction>;

    /// Mutation `createEvent` as `viewer`
    fn create_event(&self, viewer: Viewer, input: EventInput) -> Effect<EventsAction>;

    /// Mutation `bookEvent` as `viewer`
    fn book_event(&self, viewer: Viewer, event_id: String) -> Effect<EventsAction>;
}

/// Reducer for the events view
pub struct EventsReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> EventsReducer<E> {
    /// Creates a new `EventsReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for EventsReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventsReducer<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventsReducer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventsReducer")
    }
}

impl<E: EventsEnvironment> EventsReducer<E> {
    fn fetch(state: &mut EventsState, env: &E) -> SmallVec<[Effect<EventsAction>; 4]> {
        state.is_loading = true;
        smallvec![
            Effect::Cancel(FETCH_EVENTS),
            env.list_events().cancellable(FETCH_EVENTS),
        ]
    }

    fn close_create(state: &mut EventsState) {
        state.creating = false;
        state.form = crate::form::EventForm::default();
    }

    fn confirm_create(state: &mut EventsState, env: &E) -> SmallVec<[Effect<EventsAction>; 4]> {
        if !state.creating {
            return SmallVec::new();
        }
        let form = std::mem::take(&mut state.form);
        state.creating = false;

        let Some(viewer) = state.viewer.clone() else {
            tracing::debug!("Create confirmed without a session, nothing sent");
            return SmallVec::new();
        };

        match form.validate() {
            Ok(input) => smallvec![env.create_event(viewer, input).cancellable(CREATE_EVENT)],
            Err(reason) => {
                tracing::debug!(%reason, "Create form invalid, nothing sent");
                SmallVec::new()
            },
        }
    }

    fn view_details(state: &mut EventsState, event_id: String) {
        if state.modal_open() {
            return;
        }
        match state.find(&event_id) {
            Some(event) if state.is_own(event) => {
                tracing::debug!(%event_id, "Own events cannot be opened for booking");
            },
            Some(_) => state.selected_event = Some(event_id),
            None => tracing::debug!(%event_id, "No such event"),
        }
    }

    fn confirm_booking(state: &mut EventsState, env: &E) -> SmallVec<[Effect<EventsAction>; 4]> {
        let Some(event_id) = state.selected_event.take() else {
            return SmallVec::new();
        };
        match state.viewer.clone() {
            Some(viewer) => smallvec![env.book_event(viewer, event_id).cancellable(BOOK_EVENT)],
            None => SmallVec::new(),
        }
    }
}

impl<E: EventsEnvironment> Reducer for EventsReducer<E> {
    type State = EventsState;
    type Action = EventsAction;
    type Environment = E;

    #[allow(clippy::too_many_lines)] // one arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Lifecycle ==========
            EventsAction::Activated => {
                state.active = true;
                Self::fetch(state, env)
            },

            EventsAction::Deactivated => {
                state.active = false;
                state.is_loading = false;
                state.selected_event = None;
                Self::close_create(state);
                smallvec![
                    Effect::Cancel(FETCH_EVENTS),
                    Effect::Cancel(CREATE_EVENT),
                    Effect::Cancel(BOOK_EVENT),
                ]
            },

            EventsAction::Refresh => {
                if state.active {
                    Self::fetch(state, env)
                } else {
                    SmallVec::new()
                }
            },

            EventsAction::SessionChanged { viewer } => {
                if viewer.is_none() && state.creating {
                    Self::close_create(state);
                }
                state.viewer = viewer;
                if state.selected().is_some_and(|e| state.is_own(e)) {
                    tracing::debug!("Selected event now belongs to the viewer, closing details");
                    state.selected_event = None;
                }
                SmallVec::new()
            },

            // ========== User intents ==========
            EventsAction::StartCreate => {
                if state.viewer.is_some() && !state.modal_open() {
                    state.creating = true;
                    state.form = crate::form::EventForm::default();
                }
                SmallVec::new()
            },

            EventsAction::EditForm { field, value } => {
                if state.creating {
                    state.form.set(field, value);
                }
                SmallVec::new()
            },

            EventsAction::ConfirmCreate => Self::confirm_create(state, env),

            EventsAction::Cancel => {
                Self::close_create(state);
                state.selected_event = None;
                SmallVec::new()
            },

            EventsAction::ViewDetails { event_id } => {
                Self::view_details(state, event_id);
                SmallVec::new()
            },

            EventsAction::ConfirmBooking => Self::confirm_booking(state, env),

            EventsAction::DismissError => {
                state.error = None;
                SmallVec::new()
            },

            EventsAction::DismissNotice => {
                state.notice = None;
                SmallVec::new()
            },

            // ========== Results ==========
            _ if !state.active => {
                tracing::debug!("View inactive, dropping result");
                SmallVec::new()
            },

            EventsAction::EventsLoaded { events } => {
                tracing::debug!(count = events.len(), "Events loaded");
                state.events = events;
                state.is_loading = false;
                if state.selected().is_none() {
                    state.selected_event = None;
                }
                SmallVec::new()
            },

            EventsAction::EventsLoadFailed { error } => {
                tracing::warn!(%error, "Loading events failed");
                state.is_loading = false;
                state.error = Some(ViewError::new(Operation::LoadEvents, &error));
                SmallVec::new()
            },

            EventsAction::EventCreated { event } => {
                tracing::info!(event_id = %event.id, "Event created");
                state.events.push(event);
                SmallVec::new()
            },

            EventsAction::CreateFailed { error } => {
                tracing::warn!(%error, "Creating event failed");
                state.error = Some(ViewError::new(Operation::CreateEvent, &error));
                SmallVec::new()
            },

            EventsAction::EventBooked { event_id, booking } => {
                tracing::info!(%event_id, booking_id = %booking.id, "Event booked");
                let title = state
                    .find(&event_id)
                    .map_or_else(|| event_id.clone(), |e| e.title.clone());
                state.notice = Some(format!("Booked \"{title}\""));
                SmallVec::new()
            },

            EventsAction::BookingFailed { event_id, error } => {
                tracing::warn!(%event_id, %error, "Booking failed");
                state.error = Some(ViewError::new(Operation::BookEvent, &error));
                SmallVec::new()
            },
        }
    }
}
