//! GraphQL request envelope, response envelope and the operations used by
//! the client

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::GraphQlError;

/// Lists every event with its creator
pub const EVENTS_QUERY: &str = r"
query {
    events {
        _id
        title
        description
        date
        price
        creator {
            _id
            email
        }
    }
}
";

/// Creates an event owned by the bearer of the token
pub const CREATE_EVENT_MUTATION: &str = r"
mutation CreateEvent($title: String!, $description: String!, $price: Float!, $date: String!) {
    createEvent(eventInput: {title: $title, description: $description, price: $price, date: $date}) {
        _id
        title
        description
        date
        price
    }
}
";

/// Books an event for the bearer of the token
pub const BOOK_EVENT_MUTATION: &str = r"
mutation BookEvent($id: ID!) {
    bookEvent(eventId: $id) {
        _id
        createdAt
        updatedAt
    }
}
";

/// Exchanges credentials for a token
pub const LOGIN_QUERY: &str = r"
query Login($email: String!, $password: String!) {
    login(email: $email, password: $password) {
        userId
        token
        tokenExpiration
    }
}
";

/// Body POSTed to the endpoint
#[derive(Clone, Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    /// Query or mutation document
    pub query: &'a str,
    /// Variables, omitted for queries without any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// A single entry of the `errors` array
#[derive(Clone, Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    /// Human readable message
    pub message: String,
}

/// Response envelope
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct GraphQlResponse<T> {
    /// Operation result
    pub data: Option<T>,
    /// Errors reported by the server
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

impl<T: DeserializeOwned> GraphQlResponse<T> {
    /// Turn the envelope into the data or the reported errors
    ///
    /// # Errors
    ///
    /// Returns [`GraphQlError::Graphql`] when `errors` is non-empty and
    /// [`GraphQlError::MissingData`] when `data` is absent or null.
    pub fn into_result(self) -> Result<T, GraphQlError> {
        if !self.errors.is_empty() {
            return Err(GraphQlError::Graphql {
                messages: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        self.data.ok_or(GraphQlError::MissingData)
    }
}

/// `data` of [`EVENTS_QUERY`]
#[derive(Debug, Deserialize)]
pub struct EventsData {
    /// Listed events
    pub events: Vec<crate::types::Event>,
}

/// `data` of [`CREATE_EVENT_MUTATION`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventData {
    /// Created event
    pub create_event: crate::types::CreatedEvent,
}

/// `data` of [`BOOK_EVENT_MUTATION`]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEventData {
    /// Booking acknowledgement
    pub book_event: crate::types::Booking,
}

/// `data` of [`LOGIN_QUERY`]
#[derive(Debug, Deserialize)]
pub struct LoginData {
    /// Session data
    pub login: crate::types::AuthData,
}
