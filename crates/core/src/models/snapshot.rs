use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::errors::CoreError;

/// Housing costs (rent, mortgage).
pub const HOUSING: &str = "Housing";
/// Commuting and vehicle costs.
pub const TRANSPORTATION: &str = "Transportation";
/// Groceries and eating out.
pub const FOOD: &str = "Food";
/// Recurring utility bills.
pub const UTILITIES: &str = "Utilities";

/// Categories counted as needs in the ratio breakdown.
/// Everything else, Transportation included, counts as wants.
pub const NEEDS_CATEGORIES: [&str; 3] = [HOUSING, FOOD, UTILITIES];

/// One submitted view of a user's monthly finances.
///
/// **Immutable once constructed** — analysis never mutates a snapshot,
/// it derives fresh summaries from it. `savings_goal` is an *annual*
/// target; the analyzer and projector divide it down to monthly figures.
///
/// Category names are matched exactly against the constants above.
/// Unrecognized categories are accepted and count toward totals, but get
/// no needs/wants/trim special-casing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Unique identifier
    pub id: Uuid,

    /// Submission date (no time component — daily granularity)
    pub date: NaiveDate,

    /// Monthly income, non-negative. Zero is in contract.
    pub income: f64,

    /// Monthly spend per category. A `BTreeMap` keeps keys unique and
    /// iteration order deterministic across runs.
    pub expenses: BTreeMap<String, f64>,

    /// Annual savings goal, non-negative
    pub savings_goal: f64,
}

impl FinancialSnapshot {
    /// Build a validated snapshot.
    ///
    /// Rejects negative or non-finite amounts and blank category names.
    /// Zero income is valid input: the analyzer degrades ratios to zero
    /// rather than dividing by it.
    pub fn new(
        income: f64,
        expenses: BTreeMap<String, f64>,
        savings_goal: f64,
        date: NaiveDate,
    ) -> Result<Self, CoreError> {
        let snapshot = Self {
            id: Uuid::new_v4(),
            date,
            income,
            expenses,
            savings_goal,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the invariants `new` enforces. Also run on imported
    /// snapshots, which bypass the constructor.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.income.is_finite() || self.income < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Income must be a non-negative number, got {}",
                self.income
            )));
        }
        if !self.savings_goal.is_finite() || self.savings_goal < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Savings goal must be a non-negative number, got {}",
                self.savings_goal
            )));
        }
        for (category, amount) in &self.expenses {
            if category.trim().is_empty() {
                return Err(CoreError::ValidationError(
                    "Expense category name must not be empty".into(),
                ));
            }
            if !amount.is_finite() || *amount < 0.0 {
                return Err(CoreError::ValidationError(format!(
                    "Expense for '{category}' must be a non-negative number, got {amount}"
                )));
            }
        }
        Ok(())
    }

    /// Spend recorded for a category, 0 when absent.
    #[must_use]
    pub fn expense(&self, category: &str) -> f64 {
        self.expenses.get(category).copied().unwrap_or(0.0)
    }

    /// Sum of all category amounts.
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.expenses.values().sum()
    }
}
