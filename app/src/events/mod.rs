//! The events view: list, create modal and detail/booking modal.

pub mod reducer;
pub mod types;
pub mod view;

pub use reducer::{EventsEnvironment, EventsReducer};
pub use types::{
    BOOK_EVENT, CREATE_EVENT, EventsAction, EventsState, FETCH_EVENTS, Operation, ViewError,
};
pub use view::{EventsPageView, ListView, ModalView, RowAction, format_date, format_date_in};
