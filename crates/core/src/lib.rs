pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use std::collections::BTreeMap;

use models::{
    analysis::BudgetSummary, profile::Profile, projection::ProjectionRow, settings::Settings,
    snapshot::FinancialSnapshot,
};
use providers::registry::AdvisoryProviderRegistry;
use services::{budget_service::BudgetService, projection_service::ProjectionService};
use storage::manager::StorageManager;

use errors::CoreError;

/// Default projection horizon in months (one year).
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Main entry point for the Budget Planner core library.
/// Holds the profile state and all services needed to operate on it.
#[must_use]
pub struct BudgetPlanner {
    profile: Profile,
    budget_service: BudgetService,
    projection_service: ProjectionService,
    advisory_registry: AdvisoryProviderRegistry,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for BudgetPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetPlanner")
            .field("snapshots", &self.profile.snapshots.len())
            .field("settings", &self.profile.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl BudgetPlanner {
    /// Create a brand new empty profile with default settings.
    pub fn create_new() -> Self {
        let profile = Profile::default();
        Self::build(profile)
    }

    /// Load an existing profile from envelope bytes.
    /// Use this for WASM / Tauri where the frontend handles file I/O.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, CoreError> {
        let profile = StorageManager::load_from_bytes(data)?;
        Ok(Self::build(profile))
    }

    /// Save the current profile to envelope bytes.
    /// Returns raw bytes that the frontend can write to a file.
    /// Clears the unsaved-changes flag on success.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.profile)?;
        self.dirty = false;
        Ok(bytes)
    }

    /// Load from a profile file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let profile = StorageManager::load_from_file(path)?;
        Ok(Self::build(profile))
    }

    /// Save to a profile file on disk (native only, not WASM).
    /// Clears the unsaved-changes flag on success.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(&mut self, path: &str) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.profile, path)?;
        self.dirty = false;
        Ok(())
    }

    // ── Snapshot Management ─────────────────────────────────────────

    /// Record a submitted snapshot: monthly income, monthly spend per
    /// category, and the ANNUAL savings goal.
    ///
    /// Validates all amounts (non-negative, finite) before committing.
    pub fn submit_snapshot(
        &mut self,
        income: f64,
        expenses: BTreeMap<String, f64>,
        savings_goal: f64,
        date: NaiveDate,
    ) -> Result<uuid::Uuid, CoreError> {
        let snapshot = FinancialSnapshot::new(income, expenses, savings_goal, date)?;
        let id = snapshot.id;
        Self::binary_insert(&mut self.profile.snapshots, snapshot);
        self.dirty = true;
        Ok(id)
    }

    /// Get a single snapshot by its ID.
    #[must_use]
    pub fn get_snapshot(&self, snapshot_id: uuid::Uuid) -> Option<&FinancialSnapshot> {
        self.profile.snapshots.iter().find(|s| s.id == snapshot_id)
    }

    /// The most recently dated snapshot, if any.
    #[must_use]
    pub fn latest_snapshot(&self) -> Option<&FinancialSnapshot> {
        self.profile.snapshots.last()
    }

    /// All snapshots, newest first (internal storage is oldest-first).
    #[must_use]
    pub fn get_snapshots(&self) -> Vec<&FinancialSnapshot> {
        let mut snapshots: Vec<&FinancialSnapshot> = self.profile.snapshots.iter().collect();
        snapshots.reverse();
        snapshots
    }

    /// Remove a snapshot by its ID, returning it.
    pub fn remove_snapshot(
        &mut self,
        snapshot_id: uuid::Uuid,
    ) -> Result<FinancialSnapshot, CoreError> {
        let idx = self
            .profile
            .snapshots
            .iter()
            .position(|s| s.id == snapshot_id)
            .ok_or_else(|| CoreError::SnapshotNotFound(snapshot_id.to_string()))?;
        let removed = self.profile.snapshots.remove(idx);
        self.dirty = true;
        Ok(removed)
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.profile.snapshots.len()
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// Analyze the most recently dated snapshot.
    pub fn analyze_latest(&self) -> Result<BudgetSummary, CoreError> {
        let snapshot = self
            .latest_snapshot()
            .ok_or_else(|| CoreError::SnapshotNotFound("no snapshots recorded".into()))?;
        Ok(self.analyze_snapshot(snapshot))
    }

    /// Analyze a recorded snapshot by its ID.
    pub fn analyze(&self, snapshot_id: uuid::Uuid) -> Result<BudgetSummary, CoreError> {
        let snapshot = self
            .get_snapshot(snapshot_id)
            .ok_or_else(|| CoreError::SnapshotNotFound(snapshot_id.to_string()))?;
        Ok(self.analyze_snapshot(snapshot))
    }

    /// Derive ratios and advisories from any snapshot, recorded or not.
    /// Pure: same snapshot in, same summary out.
    #[must_use]
    pub fn analyze_snapshot(&self, snapshot: &FinancialSnapshot) -> BudgetSummary {
        self.budget_service
            .analyze(snapshot, &self.profile.settings.default_currency)
    }

    // ── Projection ──────────────────────────────────────────────────

    /// Project cumulative savings from a summary over `horizon` months.
    /// `horizon == 0` yields an empty table.
    #[must_use]
    pub fn project(&self, summary: &BudgetSummary, horizon: u32) -> Vec<ProjectionRow> {
        self.projection_service.project(summary, horizon)
    }

    /// Analyze the latest snapshot and project it over the default
    /// twelve-month horizon.
    pub fn project_latest(&self) -> Result<Vec<ProjectionRow>, CoreError> {
        let summary = self.analyze_latest()?;
        Ok(self.project(&summary, DEFAULT_HORIZON_MONTHS))
    }

    // ── Advisory Text ───────────────────────────────────────────────

    /// Ask the configured advisory providers for free-form advice on a
    /// summary. Errors when none is configured or all fail.
    pub async fn generate_advisory(&self, summary: &BudgetSummary) -> Result<String, CoreError> {
        self.advisory_registry.generate_advisory(summary).await
    }

    /// Best-effort advice: any provider failure becomes the fixed
    /// placeholder text. The numeric summary is never blocked on this.
    pub async fn generate_advisory_or_fallback(&self, summary: &BudgetSummary) -> String {
        self.advisory_registry
            .generate_advisory_or_fallback(summary)
            .await
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Set the default display currency (e.g., "USD", "EUR", "PLN").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_default_currency(&mut self, currency: String) -> Result<(), CoreError> {
        let trimmed = currency.trim().to_uppercase();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::ValidationError(
                format!("Invalid currency code '{currency}': must be exactly 3 ASCII letters (e.g., USD, EUR, PLN)"),
            ));
        }
        self.profile.settings.default_currency = trimmed;
        self.dirty = true;
        Ok(())
    }

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.profile.settings
    }

    /// Set an API key for an advisory provider (e.g., "openai").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.profile.settings.api_keys.insert(provider, key);

        self.advisory_registry =
            AdvisoryProviderRegistry::new_with_defaults(&self.profile.settings.api_keys);
        self.dirty = true;
    }

    /// Remove an API key for an advisory provider.
    /// Rebuilds the provider registry so the removal takes effect immediately.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.profile.settings.api_keys.remove(provider).is_some();
        if removed {
            self.advisory_registry =
                AdvisoryProviderRegistry::new_with_defaults(&self.profile.settings.api_keys);
            self.dirty = true;
        }
        removed
    }

    /// Returns `true` if the profile has been modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all snapshots as a JSON string.
    pub fn export_snapshots_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.profile.snapshots)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize snapshots: {e}")))
    }

    /// Import snapshots from a JSON string. All snapshots are validated
    /// first; if any fails validation, none are added (all-or-nothing).
    /// Returns the number of snapshots imported.
    pub fn import_snapshots_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let snapshots: Vec<FinancialSnapshot> = serde_json::from_str(json)?;

        // Deserialized snapshots bypass the constructor, so re-check
        // the invariants before touching the profile.
        for snapshot in &snapshots {
            snapshot.validate()?;
        }

        let count = snapshots.len();
        for snapshot in snapshots {
            Self::binary_insert(&mut self.profile.snapshots, snapshot);
        }
        if count > 0 {
            self.dirty = true;
        }
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Binary insert into the date-sorted snapshot Vec in O(log n).
    fn binary_insert(snapshots: &mut Vec<FinancialSnapshot>, snapshot: FinancialSnapshot) {
        let pos = snapshots
            .binary_search_by_key(&snapshot.date, |s| s.date)
            .unwrap_or_else(|pos| pos);
        snapshots.insert(pos, snapshot);
    }

    fn build(profile: Profile) -> Self {
        let advisory_registry =
            AdvisoryProviderRegistry::new_with_defaults(&profile.settings.api_keys);
        let budget_service = BudgetService::new();
        let projection_service = ProjectionService::new();

        Self {
            profile,
            budget_service,
            projection_service,
            advisory_registry,
            dirty: false,
        }
    }
}
