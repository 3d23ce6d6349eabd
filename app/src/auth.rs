//! Session state shared by the navigation and the events view.
//!
//! The auth store holds at most one session. Logging in schedules a
//! cancellable expiry timer; logging out (or logging in again) cancels it.
//! Consumers observe the store through `Store::observe` and re-render on
//! every change.

use chrono::{DateTime, TimeDelta, Utc};
use easy_event_core::{
    SmallVec, cancellable, delay, effect::Effect, effect::EffectId, reducer::Reducer, smallvec,
};
use easy_event_graphql::{AuthData, GraphQlError};
use std::fmt;
use std::marker::PhantomData;

/// Expiry timer of the current session
pub const SESSION_EXPIRY: EffectId = EffectId::new("auth.session_expiry");

/// An authenticated session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Bearer token
    pub token: String,
    /// Identifier of the logged-in user
    pub user_id: String,
    /// When the session ends on its own
    pub expires_at: DateTime<Utc>,
}

/// What other features need to know about the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Viewer {
    /// Bearer token
    pub token: String,
    /// Identifier of the logged-in user
    pub user_id: String,
}

/// A password that never shows up in logs
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wrap a plain-text password
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// The plain-text password
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// State of the auth store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Current session, if logged in
    pub session: Option<Session>,
    /// A `login` query is in flight
    pub signing_in: bool,
    /// Last sign-in failure
    pub error: Option<String>,
}

impl AuthState {
    /// The bearer token, if logged in
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// The logged-in user, if any
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Whether a token is present
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Snapshot handed to the events view
    #[must_use]
    pub fn viewer(&self) -> Option<Viewer> {
        self.session.as_ref().map(|s| Viewer {
            token: s.token.clone(),
            user_id: s.user_id.clone(),
        })
    }
}

/// Actions of the auth store
#[derive(Clone, Debug)]
pub enum AuthAction {
    /// Store a session that ends after `expires_in`
    Login {
        /// Bearer token
        token: String,
        /// Logged-in user
        user_id: String,
        /// Lifetime of the session
        expires_in: TimeDelta,
    },
    /// Clear the session
    Logout,
    /// The expiry timer of the session holding `token` fired
    SessionExpired {
        /// Token the timer was scheduled for
        token: String,
    },
    /// Exchange credentials for a session
    SignIn {
        /// Account email
        email: String,
        /// Account password
        password: Password,
    },
    /// The `login` query succeeded
    SignInSucceeded {
        /// Session data returned by the server
        auth: AuthData,
    },
    /// The `login` query failed
    SignInFailed {
        /// What went wrong
        error: GraphQlError,
    },
    /// Hide the sign-in error
    DismissError,
}

/// Dependencies of the auth store
pub trait AuthEnvironment: Send + Sync {
    /// Current time, used to compute `expires_at`
    fn now(&self) -> DateTime<Utc>;

    /// Issue the `login` query
    ///
    /// Resolves to `SignInSucceeded` or `SignInFailed`.
    fn sign_in(&self, email: String, password: Password) -> Effect<AuthAction>;
}

/// Reducer of the auth store
pub struct AuthReducer<E> {
    _env: PhantomData<fn() -> E>,
}

impl<E> AuthReducer<E> {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self { _env: PhantomData }
    }
}

impl<E> Default for AuthReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for AuthReducer<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for AuthReducer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthReducer")
    }
}

impl<E: AuthEnvironment> AuthReducer<E> {
    fn login(
        state: &mut AuthState,
        token: String,
        user_id: String,
        expires_in: TimeDelta,
        env: &E,
    ) -> SmallVec<[Effect<AuthAction>; 4]> {
        // Any earlier timer belongs to a session that is being replaced
        let cancel_previous = Effect::Cancel(SESSION_EXPIRY);

        let timer = match expires_in.to_std() {
            Ok(timer) if !timer.is_zero() => timer,
            _ => {
                tracing::debug!("Login with non-positive lifetime, staying logged out");
                state.session = None;
                return smallvec![cancel_previous];
            },
        };

        let expires_at = env
            .now()
            .checked_add_signed(expires_in)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::info!(user_id = %user_id, %expires_at, "Logged in");
        state.session = Some(Session {
            token: token.clone(),
            user_id,
            expires_at,
        });
        state.error = None;

        smallvec![
            cancel_previous,
            cancellable! {
                id: SESSION_EXPIRY,
                effect: delay! {
                    duration: timer,
                    action: AuthAction::SessionExpired { token }
                }
            },
        ]
    }
}

impl<E: AuthEnvironment> Reducer for AuthReducer<E> {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::Login {
                token,
                user_id,
                expires_in,
            } => Self::login(state, token, user_id, expires_in, env),

            AuthAction::Logout => {
                if state.session.take().is_some() {
                    tracing::info!("Logged out");
                }
                smallvec![Effect::Cancel(SESSION_EXPIRY)]
            },

            AuthAction::SessionExpired { token } => {
                if state.token() == Some(token.as_str()) {
                    tracing::info!("Session expired");
                    state.session = None;
                }
                SmallVec::new()
            },

            AuthAction::SignIn { email, password } => {
                state.signing_in = true;
                state.error = None;
                smallvec![env.sign_in(email, password)]
            },

            AuthAction::SignInSucceeded { auth } => {
                state.signing_in = false;
                let expires_in =
                    TimeDelta::try_hours(auth.token_expiration).unwrap_or(TimeDelta::MAX);
                Self::login(state, auth.token, auth.user_id, expires_in, env)
            },

            AuthAction::SignInFailed { error } => {
                tracing::warn!(error = %error, "Sign-in failed");
                state.signing_in = false;
                state.error = Some(error.to_string());
                SmallVec::new()
            },

            AuthAction::DismissError => {
                state.error = None;
                SmallVec::new()
            },
        }
    }
}
