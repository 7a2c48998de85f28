use serde::{Deserialize, Serialize};

use super::settings::Settings;

/// Explicit per-user session state.
///
/// The embedding layer creates one per user session and passes it by
/// reference into each request handler. The core never holds a session;
/// analysis and projection work the same whether or not anyone is
/// logged in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    authenticated: bool,
    email: Option<String>,
}

impl Session {
    /// Fresh unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder credential check against the profile settings.
    /// Returns `true` and marks the session authenticated on a match.
    pub fn login(&mut self, settings: &Settings, email: &str, password: &str) -> bool {
        if settings.credentials.matches(email, password) {
            self.authenticated = true;
            self.email = Some(email.to_string());
            true
        } else {
            false
        }
    }

    /// Clear authentication state and identity.
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.email = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Email of the logged-in user, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
