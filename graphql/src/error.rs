//! Error types for the GraphQL client

use thiserror::Error;

/// Errors that can occur when talking to the GraphQL endpoint
///
/// Payloads are kept as strings so the error can travel inside actions,
/// which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphQlError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with something other than 200 or 201
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Response parsing failed: {0}")]
    Parse(String),

    /// Server reported GraphQL errors
    #[error("GraphQL error: {}", messages.join("; "))]
    Graphql {
        /// The `message` of every entry in `errors`
        messages: Vec<String>,
    },

    /// Response had neither `data` nor `errors`
    #[error("Response contained no data")]
    MissingData,
}
