use serde::{Deserialize, Serialize};

/// One period of the savings projection.
///
/// `target_cumulative` is the idealized linear path to the goal;
/// `projected_cumulative` accumulates the current monthly savings at a
/// constant rate, no compounding. `gap` is constant across periods
/// since the model assumes a flat monthly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Period number, 1-based
    pub period: u32,

    /// monthly_target * period
    pub target_cumulative: f64,

    /// monthly_savings * period
    pub projected_cumulative: f64,

    /// savings_goal / horizon
    pub monthly_target: f64,

    /// Current monthly savings rate (may be negative)
    pub current_rate: f64,

    /// current_rate - monthly_target
    pub gap: f64,
}
