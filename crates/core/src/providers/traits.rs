use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::analysis::BudgetSummary;

/// Trait abstraction for advisory-text providers.
///
/// Advice is an optional annotation on the numeric results: callers
/// must always be able to render a summary even when every provider
/// fails. If a backend stops working or changes, we replace only that
/// one implementation — the rest of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AdvisoryProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Generate free-form advisory text for a computed summary.
    ///
    /// Implementations read only the summary's numeric fields; they
    /// never see raw credentials or the stored profile.
    async fn generate_advisory(&self, summary: &BudgetSummary) -> Result<String, CoreError>;
}
