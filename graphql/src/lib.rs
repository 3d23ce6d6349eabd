//! # Easy Event GraphQL Client
//!
//! Typed access to the four operations of the Easy Event API: listing
//! events, creating an event, booking an event and logging in.
//!
//! ## Example
//!
//! ```no_run
//! use easy_event_graphql::GraphQlClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphQlClient::new("http://localhost:8000/graphql");
//!
//!     for event in client.events().await? {
//!         println!("{} ({} Eur)", event.title, event.price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod types;

// Re-export main types for convenience
pub use client::{DEFAULT_ENDPOINT, GraphQlClient};
pub use error::GraphQlError;
pub use types::{AuthData, Booking, CreatedEvent, Creator, Event, EventInput};
