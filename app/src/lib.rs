//! # Easy Event
//!
//! Headless client for the Easy Event GraphQL API.
//!
//! The client is split the same way a browser front end would be:
//!
//! - [`auth`]: the session store (token, user, expiry timer)
//! - [`navigation`]: links that depend on the session
//! - [`events`]: the list, create modal and booking modal
//! - [`shell`]: wires the stores together and renders both views as text
//!
//! Features are reducers; network calls and timers are effects executed by
//! [`easy_event_runtime::Store`]. [`environment::GraphQlEnvironment`] is the
//! production environment for both stores.

pub mod auth;
pub mod command;
pub mod config;
pub mod environment;
pub mod events;
pub mod form;
pub mod navigation;
pub mod shell;

pub use auth::{AuthAction, AuthEnvironment, AuthReducer, AuthState, Password, Viewer};
pub use config::{AppConfig, ConfigError};
pub use environment::GraphQlEnvironment;
pub use events::{EventsAction, EventsEnvironment, EventsPageView, EventsReducer, EventsState};
pub use form::{EventForm, FormError, FormField};
pub use navigation::{Navigation, NavigationView};
pub use shell::Shell;
