use crate::models::analysis::{Advisory, AdvisoryKind};
use crate::models::snapshot::{FOOD, HOUSING, TRANSPORTATION, UTILITIES};

/// Needs spending above this share of income triggers EssentialOverspend.
const NEEDS_LIMIT_PCT: f64 = 50.0;
/// Wants spending above this share of income triggers DiscretionaryOverspend.
const WANTS_LIMIT_PCT: f64 = 30.0;
/// Savings below this share of income triggers LowSavingsRate.
const SAVINGS_FLOOR_PCT: f64 = 20.0;
/// Housing alone above this fraction of income triggers HousingOverload.
const HOUSING_LIMIT_FRACTION: f64 = 0.30;
/// An emergency fund is six months of income.
const EMERGENCY_FUND_MONTHS: f64 = 6.0;
/// The annual goal is spread over twelve monthly targets.
const MONTHS_PER_YEAR: f64 = 12.0;

/// Snapshot-derived figures the advisory rules read.
///
/// Built once per analysis by `BudgetService`; rules never recompute
/// ratios, they only compare and format.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleContext {
    pub income: f64,
    pub savings_goal: f64,
    pub monthly_savings: f64,
    pub savings_ratio: f64,
    pub needs_ratio: f64,
    pub wants_ratio: f64,
    pub housing: f64,
    pub food: f64,
    pub utilities: f64,
    pub transportation: f64,
}

impl RuleContext {
    fn spend(&self, category: &str) -> f64 {
        match category {
            HOUSING => self.housing,
            FOOD => self.food,
            UTILITIES => self.utilities,
            TRANSPORTATION => self.transportation,
            _ => 0.0,
        }
    }
}

/// A single advisory rule: fires when `applies` holds, producing one
/// formatted message.
///
/// Rules run in table order and each is independent; the resulting
/// advisory order is part of the output contract (it drives display
/// order downstream).
struct AdvisoryRule {
    kind: AdvisoryKind,
    applies: fn(&RuleContext) -> bool,
    message: fn(&RuleContext) -> String,
}

/// The fixed-order rule table. The income-ratio rules gate on
/// `income > 0`: with zero income every ratio defaults to 0 and a
/// percent-of-income guideline is meaningless.
const RULES: &[AdvisoryRule] = &[
    AdvisoryRule {
        kind: AdvisoryKind::EssentialOverspend,
        applies: |ctx| ctx.income > 0.0 && ctx.needs_ratio > NEEDS_LIMIT_PCT,
        message: |ctx| {
            format!(
                "Essential spending is {:.1}% of income, above the {NEEDS_LIMIT_PCT:.0}% guideline",
                ctx.needs_ratio
            )
        },
    },
    AdvisoryRule {
        kind: AdvisoryKind::DiscretionaryOverspend,
        applies: |ctx| ctx.income > 0.0 && ctx.wants_ratio > WANTS_LIMIT_PCT,
        message: |ctx| {
            format!(
                "Discretionary spending is {:.1}% of income, above the {WANTS_LIMIT_PCT:.0}% guideline",
                ctx.wants_ratio
            )
        },
    },
    AdvisoryRule {
        kind: AdvisoryKind::LowSavingsRate,
        applies: |ctx| ctx.income > 0.0 && ctx.savings_ratio < SAVINGS_FLOOR_PCT,
        message: |ctx| {
            let gap = SAVINGS_FLOOR_PCT / 100.0 * ctx.income - ctx.monthly_savings;
            format!(
                "Savings rate is {:.1}%; saving ${gap:.2} more per month would reach the {SAVINGS_FLOOR_PCT:.0}% guideline",
                ctx.savings_ratio
            )
        },
    },
    AdvisoryRule {
        kind: AdvisoryKind::HousingOverload,
        applies: |ctx| ctx.income > 0.0 && ctx.housing > HOUSING_LIMIT_FRACTION * ctx.income,
        message: |ctx| {
            format!(
                "Housing costs ${:.2} exceed 30% of income (${:.2})",
                ctx.housing,
                HOUSING_LIMIT_FRACTION * ctx.income
            )
        },
    },
    AdvisoryRule {
        kind: AdvisoryKind::EmergencyFundTimeline,
        applies: |ctx| months_to_emergency_fund(ctx).is_some(),
        message: |ctx| {
            let months = months_to_emergency_fund(ctx).unwrap_or(0.0);
            format!(
                "A six-month emergency fund is about {months:.1} months away at the current savings rate"
            )
        },
    },
];

/// Months until savings accumulate to six months of income, measured
/// against the goal already set aside. `None` when monthly savings are
/// not positive (a timeline needs positive accrual) or when the fund is
/// already covered.
fn months_to_emergency_fund(ctx: &RuleContext) -> Option<f64> {
    if ctx.monthly_savings <= 0.0 {
        return None;
    }
    let months = (ctx.income * EMERGENCY_FUND_MONTHS - ctx.savings_goal) / ctx.monthly_savings;
    (months > 0.0).then_some(months)
}

/// Trim candidates for closing a monthly goal shortfall, walked in
/// order. The fraction caps how much of a category's spend a suggestion
/// may cut.
const TRIM_CANDIDATES: &[(&str, f64)] = &[(FOOD, 0.30), (UTILITIES, 0.20), (TRANSPORTATION, 0.25)];

/// Up to one GoalGapSuggestion per trim candidate, each capped at the
/// smaller of the category fraction and the deficit still uncovered.
/// Evaluable at zero income: it compares savings against the monthly
/// goal target, not against income.
fn goal_gap_suggestions(ctx: &RuleContext, advisories: &mut Vec<Advisory>) {
    let monthly_target = ctx.savings_goal / MONTHS_PER_YEAR;
    if ctx.monthly_savings >= monthly_target {
        return;
    }

    let mut deficit = monthly_target - ctx.monthly_savings;
    for (category, fraction) in TRIM_CANDIDATES {
        if deficit <= 0.0 {
            break;
        }
        let trim = (ctx.spend(category) * fraction).min(deficit);
        if trim > 0.0 {
            deficit -= trim;
            advisories.push(Advisory::new(
                AdvisoryKind::GoalGapSuggestion,
                format!("{category}: cut ${trim:.2} per month toward the savings-goal shortfall"),
            ));
        }
    }
}

/// Run every rule in fixed order and collect the advisories.
pub(crate) fn evaluate(ctx: &RuleContext) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    for rule in RULES {
        if (rule.applies)(ctx) {
            advisories.push(Advisory::new(rule.kind, (rule.message)(ctx)));
        }
    }
    goal_gap_suggestions(ctx, &mut advisories);
    advisories
}
