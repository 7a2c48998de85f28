use serde::{Deserialize, Serialize};

use super::settings::Settings;
use super::snapshot::FinancialSnapshot;

/// The main data container. Everything in here gets serialized into the
/// versioned profile file.
///
/// Contains the snapshot submission history and user settings. Derived
/// summaries and projections are *not* stored — they are recomputed
/// from the snapshots on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Submitted snapshots, sorted by date (oldest first)
    pub snapshots: Vec<FinancialSnapshot>,

    /// User settings (display currency, API keys, login placeholder)
    pub settings: Settings,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            settings: Settings::default(),
        }
    }
}
