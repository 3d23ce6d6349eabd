//! Main navigation, a pure function of the auth state.

use crate::auth::{AuthAction, AuthState};
use std::fmt;

/// Brand shown on the left of the navigation bar
pub const BRAND: &str = "Easy Event";

/// A navigation link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    /// Visible text
    pub label: &'static str,
    /// Route
    pub path: &'static str,
}

const AUTHENTICATE: NavLink = NavLink {
    label: "Authenticate",
    path: "/auth",
};
const EVENTS: NavLink = NavLink {
    label: "Events",
    path: "/events",
};
const BOOKINGS: NavLink = NavLink {
    label: "Bookings",
    path: "/bookings",
};

/// Rendered navigation bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationView {
    /// Brand text
    pub brand: &'static str,
    /// Links in display order
    pub links: Vec<NavLink>,
    /// Whether the Logout button is shown
    pub logout: bool,
}

impl NavigationView {
    /// Action dispatched by the Logout button, if it is shown
    #[must_use]
    pub const fn logout_action(&self) -> Option<AuthAction> {
        if self.logout {
            Some(AuthAction::Logout)
        } else {
            None
        }
    }

    /// Whether a link with `label` is shown
    #[must_use]
    pub fn has_link(&self, label: &str) -> bool {
        self.links.iter().any(|link| link.label == label)
    }
}

/// The navigation shell
#[derive(Clone, Copy, Debug, Default)]
pub struct Navigation;

impl Navigation {
    /// Render the navigation for `auth`
    #[must_use]
    pub fn render(auth: &AuthState) -> NavigationView {
        let links = if auth.is_logged_in() {
            vec![EVENTS, BOOKINGS]
        } else {
            vec![AUTHENTICATE, EVENTS]
        };

        NavigationView {
            brand: BRAND,
            links,
            logout: auth.is_logged_in(),
        }
    }
}

impl fmt::Display for NavigationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  |", self.brand)?;
        for link in &self.links {
            write!(f, "  {} ({})", link.label, link.path)?;
        }
        if self.logout {
            write!(f, "  [Logout]")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use chrono::DateTime;

    fn logged_in() -> AuthState {
        AuthState {
            session: Some(Session {
                token: "tok".to_string(),
                user_id: "u1".to_string(),
                expires_at: DateTime::UNIX_EPOCH,
            }),
            ..AuthState::default()
        }
    }

    #[test]
    fn anonymous_navigation() {
        let view = Navigation::render(&AuthState::default());

        assert_eq!(view.brand, "Easy Event");
        assert!(view.has_link("Authenticate"));
        assert!(view.has_link("Events"));
        assert!(!view.has_link("Bookings"));
        assert!(!view.logout);
        assert!(view.logout_action().is_none());
    }

    #[test]
    fn authenticated_navigation() {
        let view = Navigation::render(&logged_in());

        assert!(!view.has_link("Authenticate"));
        assert!(view.has_link("Events"));
        assert!(view.has_link("Bookings"));
        assert!(matches!(view.logout_action(), Some(AuthAction::Logout)));
    }

    #[test]
    fn text_rendering_lists_routes() {
        assert_eq!(
            Navigation::render(&logged_in()).to_string(),
            "Easy Event  |  Events (/events)  Bookings (/bookings)  [Logout]\n"
        );
        assert_eq!(
            Navigation::render(&AuthState::default()).to_string(),
            "Easy Event  |  Authenticate (/auth)  Events (/events)\n"
        );
    }
}
