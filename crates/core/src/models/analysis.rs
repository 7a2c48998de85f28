use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Classification of a budgeting advisory.
///
/// Kinds are generated in a fixed order (the order of the variants
/// below); presentation layers rely on that order for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdvisoryKind {
    /// Needs spending above 50% of income
    EssentialOverspend,
    /// Wants spending above 30% of income
    DiscretionaryOverspend,
    /// Savings rate below the 20% guideline
    LowSavingsRate,
    /// Housing alone above 30% of income
    HousingOverload,
    /// Months remaining to a six-month emergency fund
    EmergencyFundTimeline,
    /// Category trim suggestion toward the monthly goal target
    GoalGapSuggestion,
}

impl std::fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryKind::EssentialOverspend => write!(f, "Essential Overspend"),
            AdvisoryKind::DiscretionaryOverspend => write!(f, "Discretionary Overspend"),
            AdvisoryKind::LowSavingsRate => write!(f, "Low Savings Rate"),
            AdvisoryKind::HousingOverload => write!(f, "Housing Overload"),
            AdvisoryKind::EmergencyFundTimeline => write!(f, "Emergency Fund Timeline"),
            AdvisoryKind::GoalGapSuggestion => write!(f, "Goal Gap Suggestion"),
        }
    }
}

/// A single advisory: a tagged classification plus a human-readable
/// message carrying the numeric detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Everything the analyzer derives from one snapshot.
///
/// A plain data record for any presentation layer (chart, table, or
/// text renderer) and for the optional advisory-text providers.
/// Recomputed fresh on every analysis request — never persisted or
/// incrementally updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Snapshot this summary was computed from
    pub snapshot_id: Uuid,

    /// Date of the underlying snapshot
    pub as_of_date: NaiveDate,

    /// Display currency for all monetary values
    pub currency: String,

    /// Monthly income, copied from the snapshot
    pub income: f64,

    /// Annual savings goal, copied from the snapshot
    pub savings_goal: f64,

    /// Per-category breakdown, copied for renderers
    pub expenses: BTreeMap<String, f64>,

    /// Sum of all expense categories
    pub total_expenses: f64,

    /// income - total_expenses; negative means overspending
    pub monthly_savings: f64,

    /// Percentage of income left after expenses (0 when income is 0)
    pub savings_ratio: f64,

    /// Percentage of income spent on needs categories (0 when income is 0)
    pub needs_ratio: f64,

    /// Percentage of income spent on everything else (0 when income is 0)
    pub wants_ratio: f64,

    /// Rule-based advisories, in generation order
    pub advisories: Vec<Advisory>,
}
