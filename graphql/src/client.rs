//! GraphQL-over-HTTP client for the Easy Event API

use crate::{
    error::GraphQlError,
    request::{
        BOOK_EVENT_MUTATION, BookEventData, CREATE_EVENT_MUTATION, CreateEventData,
        EVENTS_QUERY, EventsData, GraphQlRequest, GraphQlResponse, LOGIN_QUERY, LoginData,
    },
    types::{AuthData, Booking, CreatedEvent, Event, EventInput},
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/graphql";

/// Client for the Easy Event GraphQL endpoint
#[derive(Clone, Debug)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client for `endpoint` without a request timeout
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client whose requests fail after `timeout`
    ///
    /// # Errors
    ///
    /// Returns `GraphQlError::Request` if the HTTP client cannot be built
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GraphQlError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GraphQlError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// The endpoint requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// List all events (no authentication)
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, GraphQL
    /// errors or malformed responses
    pub async fn events(&self) -> Result<Vec<Event>, GraphQlError> {
        let data: EventsData = self.execute("events", EVENTS_QUERY, None, None).await?;
        Ok(data.events)
    }

    /// Create an event as the owner of `token`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, GraphQL
    /// errors or malformed responses
    pub async fn create_event(
        &self,
        token: &str,
        input: &EventInput,
    ) -> Result<CreatedEvent, GraphQlError> {
        let variables = json!({
            "title": input.title,
            "description": input.description,
            "price": input.price,
            "date": input.date,
        });

        let data: CreateEventData = self
            .execute("createEvent", CREATE_EVENT_MUTATION, Some(variables), Some(token))
            .await?;
        Ok(data.create_event)
    }

    /// Book `event_id` for the owner of `token`
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, GraphQL
    /// errors or malformed responses
    pub async fn book_event(&self, token: &str, event_id: &str) -> Result<Booking, GraphQlError> {
        let data: BookEventData = self
            .execute(
                "bookEvent",
                BOOK_EVENT_MUTATION,
                Some(json!({ "id": event_id })),
                Some(token),
            )
            .await?;
        Ok(data.book_event)
    }

    /// Exchange credentials for a session token
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, non-success statuses, GraphQL
    /// errors (wrong credentials) or malformed responses
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData, GraphQlError> {
        let data: LoginData = self
            .execute(
                "login",
                LOGIN_QUERY,
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await?;
        Ok(data.login)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> Result<T, GraphQlError> {
        tracing::debug!(operation, endpoint = %self.endpoint, "Sending GraphQL request");

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "GraphQL request failed");
            GraphQlError::Request(e.to_string())
        })?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let envelope = response
                    .json::<GraphQlResponse<T>>()
                    .await
                    .map_err(|e| GraphQlError::Parse(e.to_string()))?;
                envelope.into_result()
            },
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(operation, status = status.as_u16(), "GraphQL request rejected");
                Err(GraphQlError::Status {
                    status: status.as_u16(),
                    body,
                })
            },
        }
    }
}

impl Default for GraphQlClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GraphQlClient::default();
        assert_eq!(client.endpoint(), "http://localhost:8000/graphql");
    }

    #[test]
    fn test_client_with_timeout() -> Result<(), GraphQlError> {
        let client = GraphQlClient::with_timeout("http://api.test/graphql", Duration::from_secs(5))?;
        assert_eq!(client.endpoint(), "http://api.test/graphql");
        Ok(())
    }
}
