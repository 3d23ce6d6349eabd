//! Rendering of the events view.
//!
//! [`EventsPageView::render`] turns state into a view model; its `Display`
//! impl is the text rendering used by the shell.

use super::types::EventsState;
use crate::form::FormField;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use easy_event_graphql::Event;
use std::fmt;

/// Text of the ownership notice
pub const OWNER_NOTICE: &str = "You are the owner of this event!";
/// Label of the per-row details button
pub const VIEW_DETAILS: &str = "View Details";
/// Heading above the list
pub const HEADING: &str = "Upcoming Events";

/// Format an event date the way a `de-DE` short date reads (`1.2.2024`),
/// in the local time zone
///
/// Accepts RFC 3339 timestamps, `datetime-local` input values, plain dates
/// and epoch milliseconds. Anything else is shown unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

/// [`format_date`] with instants converted to `tz`
///
/// Values without an offset (`datetime-local`, plain dates) are already
/// wall-clock dates and are not shifted.
#[must_use]
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    let trimmed = raw.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|d| d.with_timezone(tz).date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|d| d.date())
        })
        .or_else(|| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok())
        .or_else(|| {
            trimmed
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|d| d.with_timezone(tz).date_naive())
        });

    date.map_or_else(|| raw.to_string(), |d| d.format("%-d.%-m.%Y").to_string())
}

/// An input of the create modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    /// Which input
    pub field: FormField,
    /// Current contents
    pub value: String,
}

/// The open modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalView {
    /// "Add Event"
    CreateEvent {
        /// The four inputs in display order
        fields: Vec<FieldView>,
    },
    /// Detail and booking modal
    EventDetails {
        /// Event title, used as modal title
        title: String,
        /// `Price: N Eur`
        price: String,
        /// `Date: d.m.yyyy`
        date: String,
        /// Free-text description
        description: String,
        /// `Book` with a session, `Confirm` without
        confirm_label: &'static str,
    },
}

impl ModalView {
    /// Title bar text
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::CreateEvent { .. } => "Add Event",
            Self::EventDetails { title, .. } => title.as_str(),
        }
    }

    /// Label of the confirm button
    #[must_use]
    pub const fn confirm_label(&self) -> &'static str {
        match self {
            Self::CreateEvent { .. } => "Confirm",
            Self::EventDetails { confirm_label, .. } => *confirm_label,
        }
    }
}

/// What a row offers besides its data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    /// The viewer created the event
    OwnerNotice,
    /// The event can be opened for booking
    ViewDetails,
}

/// One list entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    /// Identifier passed to `ViewDetails`
    pub event_id: String,
    /// `Name: …`
    pub name: String,
    /// `Price: … Eur`
    pub price: String,
    /// `Date: …`
    pub date: String,
    /// Ownership notice or details button
    pub action: RowAction,
}

/// Body under the heading
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    /// Spinner
    Loading,
    /// The list, possibly empty
    Events(Vec<EventRow>),
}

/// Complete view model of the events page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventsPageView {
    /// A modal is open
    pub backdrop: bool,
    /// The open modal
    pub modal: Option<ModalView>,
    /// Error banner text
    pub error: Option<String>,
    /// Booking acknowledgement
    pub notice: Option<String>,
    /// "Create your events!" control is shown
    pub create_control: bool,
    /// Spinner or rows
    pub list: ListView,
}

fn price_line(price: f64) -> String {
    format!("Price: {price} Eur")
}

fn date_line(date: &str) -> String {
    format!("Date: {}", format_date(date))
}

impl EventRow {
    fn new(event: &Event, own: bool) -> Self {
        Self {
            event_id: event.id.clone(),
            name: format!("Name: {}", event.title),
            price: price_line(event.price),
            date: date_line(&event.date),
            action: if own {
                RowAction::OwnerNotice
            } else {
                RowAction::ViewDetails
            },
        }
    }
}

impl EventsPageView {
    /// Build the view model for `state`
    #[must_use]
    pub fn render(state: &EventsState) -> Self {
        let modal = if state.creating {
            Some(ModalView::CreateEvent {
                fields: FormField::ALL
                    .iter()
                    .map(|&field| FieldView {
                        field,
                        value: state.form.get(field).to_string(),
                    })
                    .collect(),
            })
        } else {
            state.selected().map(|event| ModalView::EventDetails {
                title: event.title.clone(),
                price: price_line(event.price),
                date: date_line(&event.date),
                description: event.description.clone(),
                confirm_label: if state.viewer.is_some() { "Book" } else { "Confirm" },
            })
        };

        let list = if state.is_loading {
            ListView::Loading
        } else {
            ListView::Events(
                state
                    .events
                    .iter()
                    .map(|event| EventRow::new(event, state.is_own(event)))
                    .collect(),
            )
        };

        Self {
            backdrop: modal.is_some(),
            modal,
            error: state.error.as_ref().map(ToString::to_string),
            notice: state.notice.clone(),
            create_control: state.viewer.is_some(),
            list,
        }
    }
}

impl fmt::Display for ModalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+-- {} --", self.title())?;
        match self {
            Self::CreateEvent { fields } => {
                for FieldView { field, value } in fields {
                    writeln!(f, "| {field}: {value}")?;
                }
            },
            Self::EventDetails {
                price,
                date,
                description,
                ..
            } => {
                writeln!(f, "| {price}")?;
                writeln!(f, "| {date}")?;
                writeln!(f, "| {description}")?;
            },
        }
        writeln!(f, "| [{}] [Cancel]", self.confirm_label())?;
        writeln!(f, "+--")
    }
}

impl fmt::Display for EventsPageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            writeln!(f, "[!] {error}")?;
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "[i] {notice}")?;
        }
        if self.create_control {
            writeln!(f, "Create your events!  [Create Event]")?;
        }
        writeln!(f, "== {HEADING} ==")?;
        match &self.list {
            ListView::Loading => writeln!(f, "Loading...")?,
            ListView::Events(rows) => {
                for row in rows {
                    writeln!(f, "- {}", row.name)?;
                    writeln!(f, "  {}", row.price)?;
                    writeln!(f, "  {}", row.date)?;
                    match row.action {
                        RowAction::OwnerNotice => writeln!(f, "  {OWNER_NOTICE}")?,
                        RowAction::ViewDetails => {
                            writeln!(f, "  [{VIEW_DETAILS}] ({})", row.event_id)?;
                        },
                    }
                }
            },
        }
        if let Some(modal) = &self.modal {
            write!(f, "{modal}")?;
        }
        Ok(())
    }
}
