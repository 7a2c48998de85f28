use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::analysis::BudgetSummary;

use super::openai::OpenAiProvider;
use super::traits::AdvisoryProvider;

/// Fixed placeholder shown when no provider can produce advice.
/// The numeric summary stays valid and displayable either way.
pub const FALLBACK_ADVISORY: &str = "Unable to generate recommendations at the moment.";

/// Registry of all available advisory providers.
///
/// Providers are tried in registration order; the first success wins.
/// New backends can be added without modifying existing code
/// (Open/Closed Principle).
pub struct AdvisoryProviderRegistry {
    providers: Vec<Box<dyn AdvisoryProvider>>,
}

impl AdvisoryProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with all default providers pre-configured.
    pub fn new_with_defaults(api_keys: &HashMap<String, String>) -> Self {
        let mut registry = Self::new();

        // OpenAI chat completions, requires API key
        if let Some(key) = api_keys.get("openai") {
            registry.register(Box::new(OpenAiProvider::new(key.clone())));
        }

        registry
    }

    /// Register a new advisory provider.
    pub fn register(&mut self, provider: Box<dyn AdvisoryProvider>) {
        self.providers.push(provider);
    }

    /// `true` when no provider is registered (e.g., no API key set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of all registered providers, in priority order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Try providers in order and return the first successful advisory.
    ///
    /// Returns `NoAdvisoryProvider` when the registry is empty, or the
    /// last provider error when all of them fail.
    pub async fn generate_advisory(&self, summary: &BudgetSummary) -> Result<String, CoreError> {
        if self.providers.is_empty() {
            return Err(CoreError::NoAdvisoryProvider);
        }

        let mut last_error = CoreError::NoAdvisoryProvider;
        for provider in &self.providers {
            log::debug!("requesting advisory from {}", provider.name());
            match provider.generate_advisory(summary).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    log::warn!("advisory provider {} failed: {e}", provider.name());
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }

    /// Best-effort variant: any failure becomes the fixed placeholder.
    pub async fn generate_advisory_or_fallback(&self, summary: &BudgetSummary) -> String {
        self.generate_advisory(summary)
            .await
            .unwrap_or_else(|_| FALLBACK_ADVISORY.to_string())
    }
}

impl Default for AdvisoryProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
