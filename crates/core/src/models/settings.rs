use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// User-configurable settings, stored inside the profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// The currency in which all monetary values are displayed (e.g., "USD", "EUR", "PLN").
    pub default_currency: String,

    /// Optional API keys for advisory providers that require them.
    /// Keys: provider name (e.g., "openai").
    /// Values: the API key string.
    pub api_keys: HashMap<String, String>,

    /// Placeholder login pair checked by `Session::login`.
    /// Not a security mechanism — the embedding layer owns real identity.
    #[serde(default)]
    pub credentials: Credentials,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            api_keys: HashMap::new(),
            credentials: Credentials::default(),
        }
    }
}

/// Demo email/password pair gating the presentation layer's forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "demo@example.com".to_string(),
            password: "password".to_string(),
        }
    }
}

impl Credentials {
    /// Exact comparison of both fields.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
