use crate::models::analysis::BudgetSummary;
use crate::models::snapshot::{FinancialSnapshot, FOOD, HOUSING, NEEDS_CATEGORIES, TRANSPORTATION, UTILITIES};

use super::rules::{self, RuleContext};

/// Computes budget ratios and rule-based advisories from a snapshot.
///
/// Pure business logic — no I/O, no API calls. Total over all
/// in-contract inputs: zero income degrades every income ratio to 0 and
/// suppresses the ratio-based advisories instead of failing.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Derive a full summary from one snapshot.
    ///
    /// Computation order:
    /// 1. total expenses, monthly savings
    /// 2. savings / needs / wants ratios (0 when income is 0)
    /// 3. the advisory rule table, in fixed order
    pub fn analyze(&self, snapshot: &FinancialSnapshot, currency: &str) -> BudgetSummary {
        let total_expenses = snapshot.total_expenses();
        let monthly_savings = snapshot.income - total_expenses;
        let needs_subtotal: f64 = NEEDS_CATEGORIES
            .iter()
            .map(|category| snapshot.expense(category))
            .sum();

        let (savings_ratio, needs_ratio, wants_ratio) = if snapshot.income > 0.0 {
            (
                monthly_savings / snapshot.income * 100.0,
                needs_subtotal / snapshot.income * 100.0,
                (total_expenses - needs_subtotal) / snapshot.income * 100.0,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let ctx = RuleContext {
            income: snapshot.income,
            savings_goal: snapshot.savings_goal,
            monthly_savings,
            savings_ratio,
            needs_ratio,
            wants_ratio,
            housing: snapshot.expense(HOUSING),
            food: snapshot.expense(FOOD),
            utilities: snapshot.expense(UTILITIES),
            transportation: snapshot.expense(TRANSPORTATION),
        };

        BudgetSummary {
            snapshot_id: snapshot.id,
            as_of_date: snapshot.date,
            currency: currency.to_string(),
            income: snapshot.income,
            savings_goal: snapshot.savings_goal,
            expenses: snapshot.expenses.clone(),
            total_expenses,
            monthly_savings,
            savings_ratio,
            needs_ratio,
            wants_ratio,
            advisories: rules::evaluate(&ctx),
        }
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
