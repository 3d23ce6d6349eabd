//! Create-event form state and validation

use easy_event_graphql::EventInput;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A field of the create-event form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Event title
    Title,
    /// Price in euros
    Price,
    /// Date (as typed, e.g. `2024-02-02T10:00`)
    Date,
    /// Free-text description
    Description,
}

impl FormField {
    /// Every field, in display order
    pub const ALL: [Self; 4] = [Self::Title, Self::Price, Self::Date, Self::Description];

    /// Label shown next to the input
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Date => "Date",
            Self::Description => "Description",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "price" => Ok(Self::Price),
            "date" => Ok(Self::Date),
            "description" | "desc" => Ok(Self::Description),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// Why a form could not be turned into an [`EventInput`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Title is blank
    #[error("title must not be empty")]
    EmptyTitle,
    /// Price is not a finite number
    #[error("price {0:?} is not a number")]
    InvalidPrice(String),
    /// Price is zero or negative
    #[error("price must be greater than zero")]
    NonPositivePrice,
    /// Date is blank
    #[error("date must not be empty")]
    EmptyDate,
    /// Description is blank
    #[error("description must not be empty")]
    EmptyDescription,
    /// Field name not recognised
    #[error("unknown form field {0:?}")]
    UnknownField(String),
}

/// Raw contents of the create-event form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventForm {
    /// Title input
    pub title: String,
    /// Price input, parsed on validation
    pub price: String,
    /// Date input
    pub date: String,
    /// Description input
    pub description: String,
}

impl EventForm {
    /// Replace the value of `field`
    pub fn set(&mut self, field: FormField, value: String) {
        *self.field_mut(field) = value;
    }

    /// Current value of `field`
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Price => &self.price,
            FormField::Date => &self.date,
            FormField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Price => &mut self.price,
            FormField::Date => &mut self.date,
            FormField::Description => &mut self.description,
        }
    }

    /// Validate the form into a `createEvent` input
    ///
    /// Text fields must be non-blank after trimming but are sent as typed.
    /// The price must parse to a finite number above zero.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, checked in field order.
    pub fn validate(&self) -> Result<EventInput, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidPrice(self.price.clone()))?;
        if price <= 0.0 {
            return Err(FormError::NonPositivePrice);
        }

        if self.date.trim().is_empty() {
            return Err(FormError::EmptyDate);
        }
        if self.description.trim().is_empty() {
            return Err(FormError::EmptyDescription);
        }

        Ok(EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            price,
            date: self.date.clone(),
        })
    }
}
