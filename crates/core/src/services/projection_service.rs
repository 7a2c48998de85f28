use crate::models::analysis::BudgetSummary;
use crate::models::projection::ProjectionRow;

/// Builds the savings projection table for renderers.
///
/// Pure series generation: an idealized linear path to the goal next to
/// a constant-rate accumulation of the current monthly savings. No
/// compounding, no interest.
pub struct ProjectionService;

impl ProjectionService {
    pub fn new() -> Self {
        Self
    }

    /// Project cumulative savings over `horizon` months.
    ///
    /// Returns exactly `horizon` rows, period-ascending; `horizon == 0`
    /// yields an empty table. Negative or zero savings still project
    /// mechanically — a flat or declining trajectory communicates the
    /// shortfall better than an error would.
    pub fn project(&self, summary: &BudgetSummary, horizon: u32) -> Vec<ProjectionRow> {
        if horizon == 0 {
            return Vec::new();
        }

        let monthly_target = summary.savings_goal / f64::from(horizon);
        let current_rate = summary.monthly_savings;
        let gap = current_rate - monthly_target;

        (1..=horizon)
            .map(|period| ProjectionRow {
                period,
                target_cumulative: monthly_target * f64::from(period),
                projected_cumulative: current_rate * f64::from(period),
                monthly_target,
                current_rate,
                gap,
            })
            .collect()
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}
