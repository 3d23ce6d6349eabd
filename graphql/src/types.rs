//! Domain types exchanged with the Easy Event API

use serde::{Deserialize, Serialize};

/// A listed event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Date exactly as stored by the server (usually ISO-8601)
    pub date: String,
    /// Price in euros
    pub price: f64,
    /// Owner of the event
    pub creator: Creator,
}

impl Event {
    /// Whether `user_id` created this event
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.creator.id == user_id
    }
}

/// The user who created an event
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    /// User identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Email, only present when the query selects it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Event as returned by `createEvent` (no creator selection)
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CreatedEvent {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Date as stored by the server
    pub date: String,
    /// Price in euros
    pub price: f64,
}

impl CreatedEvent {
    /// Attach the creating user, producing a list entry
    #[must_use]
    pub fn owned_by(self, user_id: impl Into<String>) -> Event {
        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
            price: self.price,
            creator: Creator {
                id: user_id.into(),
                email: None,
            },
        }
    }
}

/// Acknowledgement of a booking
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Creation timestamp as sent by the server
    pub created_at: String,
    /// Last update timestamp as sent by the server
    pub updated_at: String,
}

/// Validated input of the `createEvent` mutation
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EventInput {
    /// Title, non-empty
    pub title: String,
    /// Description, non-empty
    pub description: String,
    /// Price, strictly positive
    pub price: f64,
    /// Date as entered
    pub date: String,
}

/// Result of the `login` query
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    /// Identifier of the logged-in user
    pub user_id: String,
    /// Bearer token for authenticated mutations
    pub token: String,
    /// Token lifetime in hours
    pub token_expiration: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_reads_underscore_ids() -> Result<(), serde_json::Error> {
        let event: Event = serde_json::from_str(
            r#"{"_id":"e1","title":"Rust Meetup","description":"Talks","date":"2025-03-01T18:00:00.000Z","price":12.5,"creator":{"_id":"u1","email":"a@b.c"}}"#,
        )?;

        assert_eq!(event.id, "e1");
        assert_eq!(event.creator.email.as_deref(), Some("a@b.c"));
        assert!(event.is_owned_by("u1"));
        assert!(!event.is_owned_by("u2"));
        Ok(())
    }

    #[test]
    fn created_event_takes_response_id() {
        let created = CreatedEvent {
            id: "e9".to_string(),
            title: "Talk".to_string(),
            description: "d".to_string(),
            date: "2025-05-01".to_string(),
            price: 10.0,
        };

        let event = created.owned_by("u1");
        assert_eq!(event.id, "e9");
        assert_eq!(event.creator.id, "u1");
        assert_eq!(event.creator.email, None);
    }

    #[test]
    fn auth_data_is_camel_case() -> Result<(), serde_json::Error> {
        let auth: AuthData =
            serde_json::from_str(r#"{"userId":"u1","token":"t","tokenExpiration":1}"#)?;
        assert_eq!(auth.user_id, "u1");
        assert_eq!(auth.token_expiration, 1);
        Ok(())
    }
}
