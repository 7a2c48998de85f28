// ═══════════════════════════════════════════════════════════════════
// Service Tests — BudgetService (ratios + advisory rules) and
// ProjectionService (savings trajectory)
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::BTreeMap;

use budget_planner_core::models::analysis::{AdvisoryKind, BudgetSummary};
use budget_planner_core::models::snapshot::{
    FinancialSnapshot, FOOD, HOUSING, TRANSPORTATION, UTILITIES,
};
use budget_planner_core::services::budget_service::BudgetService;
use budget_planner_core::services::projection_service::ProjectionService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn expenses(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(category, amount)| (category.to_string(), *amount))
        .collect()
}

fn snapshot(income: f64, entries: &[(&str, f64)], goal: f64) -> FinancialSnapshot {
    FinancialSnapshot::new(income, expenses(entries), goal, d(2025, 3, 1)).unwrap()
}

fn analyze(income: f64, entries: &[(&str, f64)], goal: f64) -> BudgetSummary {
    BudgetService::new().analyze(&snapshot(income, entries, goal), "USD")
}

fn kinds(summary: &BudgetSummary) -> Vec<AdvisoryKind> {
    summary.advisories.iter().map(|a| a.kind).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ═══════════════════════════════════════════════════════════════════
//  Ratio derivation
// ═══════════════════════════════════════════════════════════════════

mod ratios {
    use super::*;

    #[test]
    fn savings_ratio_matches_definition_exactly() {
        let s = snapshot(5000.0, &[(HOUSING, 1600.0), (FOOD, 500.0)], 6000.0);
        let summary = BudgetService::new().analyze(&s, "USD");
        let total: f64 = s.expenses.values().sum();
        assert_eq!(summary.monthly_savings, s.income - total);
        assert_eq!(
            summary.savings_ratio,
            summary.monthly_savings / s.income * 100.0
        );
    }

    #[test]
    fn needs_ratio_counts_housing_food_utilities_only() {
        let summary = analyze(
            4000.0,
            &[
                (HOUSING, 1000.0),
                (FOOD, 400.0),
                (UTILITIES, 200.0),
                (TRANSPORTATION, 400.0),
                ("Entertainment", 300.0),
            ],
            0.0,
        );
        assert_close(summary.needs_ratio, 1600.0 / 4000.0 * 100.0);
        assert_close(summary.wants_ratio, 700.0 / 4000.0 * 100.0);
    }

    #[test]
    fn missing_needs_categories_contribute_zero() {
        let summary = analyze(2000.0, &[(TRANSPORTATION, 500.0)], 0.0);
        assert_close(summary.needs_ratio, 0.0);
        assert_close(summary.wants_ratio, 25.0);
    }

    #[test]
    fn unknown_categories_count_as_wants() {
        let summary = analyze(1000.0, &[("Pets", 100.0)], 0.0);
        assert_close(summary.wants_ratio, 10.0);
        assert_close(summary.needs_ratio, 0.0);
        assert_close(summary.total_expenses, 100.0);
    }

    #[test]
    fn monthly_savings_may_be_negative() {
        let summary = analyze(1000.0, &[(HOUSING, 1500.0)], 0.0);
        assert_close(summary.monthly_savings, -500.0);
        assert_close(summary.savings_ratio, -50.0);
    }

    #[test]
    fn zero_income_defaults_all_ratios_to_zero() {
        let summary = analyze(0.0, &[(HOUSING, 800.0), (FOOD, 200.0)], 1000.0);
        assert_eq!(summary.savings_ratio, 0.0);
        assert_eq!(summary.needs_ratio, 0.0);
        assert_eq!(summary.wants_ratio, 0.0);
        assert_close(summary.monthly_savings, -1000.0);
    }

    #[test]
    fn summary_copies_snapshot_context() {
        let s = snapshot(5000.0, &[(HOUSING, 1600.0)], 6000.0);
        let summary = BudgetService::new().analyze(&s, "EUR");
        assert_eq!(summary.snapshot_id, s.id);
        assert_eq!(summary.as_of_date, s.date);
        assert_eq!(summary.currency, "EUR");
        assert_eq!(summary.expenses, s.expenses);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Advisory rules
// ═══════════════════════════════════════════════════════════════════

mod advisories {
    use super::*;

    #[test]
    fn essential_overspend_fires_above_fifty_percent() {
        let summary = analyze(1000.0, &[(HOUSING, 400.0), (FOOD, 200.0)], 0.0);
        assert!(kinds(&summary).contains(&AdvisoryKind::EssentialOverspend));
    }

    #[test]
    fn essential_overspend_silent_at_exactly_fifty_percent() {
        let summary = analyze(1000.0, &[(HOUSING, 300.0), (FOOD, 200.0)], 0.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::EssentialOverspend));
    }

    #[test]
    fn discretionary_overspend_fires_above_thirty_percent() {
        let summary = analyze(1000.0, &[("Entertainment", 350.0)], 0.0);
        assert!(kinds(&summary).contains(&AdvisoryKind::DiscretionaryOverspend));
    }

    #[test]
    fn low_savings_rate_fires_below_twenty_percent() {
        // 100/1000 = 10% saved
        let summary = analyze(1000.0, &[(HOUSING, 900.0)], 0.0);
        let advisory = summary
            .advisories
            .iter()
            .find(|a| a.kind == AdvisoryKind::LowSavingsRate)
            .expect("LowSavingsRate should fire");
        // Gap to the 20% floor: 200 - 100 = 100
        assert!(advisory.message.contains("$100.00"));
    }

    #[test]
    fn low_savings_rate_silent_at_exactly_twenty_percent() {
        let summary = analyze(1000.0, &[(HOUSING, 800.0)], 0.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::LowSavingsRate));
    }

    #[test]
    fn housing_overload_fires_above_thirty_percent_of_income() {
        let summary = analyze(5000.0, &[(HOUSING, 1600.0)], 0.0);
        assert!(kinds(&summary).contains(&AdvisoryKind::HousingOverload));
    }

    #[test]
    fn housing_overload_silent_at_exactly_thirty_percent() {
        let summary = analyze(5000.0, &[(HOUSING, 1500.0)], 0.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::HousingOverload));
    }

    #[test]
    fn income_ratio_rules_suppressed_at_zero_income() {
        // Overspending on zero income would mechanically satisfy every
        // percent threshold; all four ratio rules must stay silent.
        let summary = analyze(0.0, &[(HOUSING, 900.0), ("Fun", 400.0)], 0.0);
        let found = kinds(&summary);
        assert!(!found.contains(&AdvisoryKind::EssentialOverspend));
        assert!(!found.contains(&AdvisoryKind::DiscretionaryOverspend));
        assert!(!found.contains(&AdvisoryKind::LowSavingsRate));
        assert!(!found.contains(&AdvisoryKind::HousingOverload));
    }

    #[test]
    fn emergency_fund_timeline_carries_months() {
        // savings 2400, fund 30000 - goal 6000 = 24000 -> 10 months
        let summary = analyze(
            5000.0,
            &[
                (HOUSING, 1600.0),
                (TRANSPORTATION, 300.0),
                (FOOD, 500.0),
                (UTILITIES, 200.0),
            ],
            6000.0,
        );
        let advisory = summary
            .advisories
            .iter()
            .find(|a| a.kind == AdvisoryKind::EmergencyFundTimeline)
            .expect("EmergencyFundTimeline should fire");
        assert!(advisory.message.contains("10.0 months"));
    }

    #[test]
    fn emergency_fund_timeline_absent_without_positive_savings() {
        let summary = analyze(1000.0, &[(HOUSING, 1000.0)], 0.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::EmergencyFundTimeline));

        let summary = analyze(1000.0, &[(HOUSING, 1200.0)], 0.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::EmergencyFundTimeline));
    }

    #[test]
    fn emergency_fund_timeline_absent_when_goal_already_covers_fund() {
        // 6 * 1000 = 6000 <= goal 12000 -> timeline non-positive
        let summary = analyze(1000.0, &[(HOUSING, 500.0)], 12000.0);
        assert!(!kinds(&summary).contains(&AdvisoryKind::EmergencyFundTimeline));
    }

    #[test]
    fn ordering_is_stable_across_runs() {
        let s = snapshot(
            1000.0,
            &[(HOUSING, 600.0), (FOOD, 100.0), ("Fun", 350.0)],
            2400.0,
        );
        let service = BudgetService::new();
        let first = service.analyze(&s, "USD");
        let second = service.analyze(&s, "USD");
        assert_eq!(first.advisories, second.advisories);
    }

    #[test]
    fn advisories_follow_rule_table_order() {
        // needs 70%, wants 35%, savings -5%, housing 60%; the zero goal
        // still beats negative savings, so a Food trim closes the list
        let summary = analyze(
            1000.0,
            &[(HOUSING, 600.0), (FOOD, 100.0), ("Fun", 350.0)],
            0.0,
        );
        let found = kinds(&summary);
        assert_eq!(
            found,
            vec![
                AdvisoryKind::EssentialOverspend,
                AdvisoryKind::DiscretionaryOverspend,
                AdvisoryKind::LowSavingsRate,
                AdvisoryKind::HousingOverload,
                AdvisoryKind::GoalGapSuggestion,
            ]
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Goal-gap trim suggestions
// ═══════════════════════════════════════════════════════════════════

mod goal_gap {
    use super::*;

    fn suggestions(summary: &BudgetSummary) -> Vec<&str> {
        summary
            .advisories
            .iter()
            .filter(|a| a.kind == AdvisoryKind::GoalGapSuggestion)
            .map(|a| a.message.as_str())
            .collect()
    }

    #[test]
    fn silent_when_savings_meet_monthly_target() {
        // target 500, savings 2400
        let summary = analyze(5000.0, &[(HOUSING, 1600.0), (FOOD, 500.0), (UTILITIES, 200.0), (TRANSPORTATION, 300.0)], 6000.0);
        assert!(suggestions(&summary).is_empty());
    }

    #[test]
    fn one_trim_per_category_with_spend() {
        // target 1000, savings 400, deficit 600
        // Food 400 * 0.30 = 120, Utilities 200 * 0.20 = 40,
        // Transportation 200 * 0.25 = 50
        let summary = analyze(
            3000.0,
            &[
                (HOUSING, 1800.0),
                (FOOD, 400.0),
                (UTILITIES, 200.0),
                (TRANSPORTATION, 200.0),
            ],
            12000.0,
        );
        let lines = suggestions(&summary);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Food:"));
        assert!(lines[0].contains("$120.00"));
        assert!(lines[1].starts_with("Utilities:"));
        assert!(lines[1].contains("$40.00"));
        assert!(lines[2].starts_with("Transportation:"));
        assert!(lines[2].contains("$50.00"));
    }

    #[test]
    fn trims_are_capped_by_remaining_deficit() {
        // target 100, savings 60, deficit 40; Food could give 300 but
        // only 40 is needed, and later categories get nothing
        let summary = analyze(
            2000.0,
            &[(HOUSING, 500.0), (FOOD, 1000.0), (UTILITIES, 440.0)],
            1200.0,
        );
        let lines = suggestions(&summary);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Food:"));
        assert!(lines[0].contains("$40.00"));
    }

    #[test]
    fn categories_without_spend_emit_no_line() {
        // deficit exists but only Transportation has spend
        let summary = analyze(1000.0, &[(TRANSPORTATION, 400.0), (HOUSING, 500.0)], 2400.0);
        let lines = suggestions(&summary);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Transportation:"));
        assert!(lines[0].contains("$100.00"));
    }

    #[test]
    fn evaluable_at_zero_income_but_nothing_to_trim() {
        // deficit 83.33 but every trimmable category is empty
        let summary = analyze(0.0, &[(HOUSING, 0.0)], 1000.0);
        assert!(suggestions(&summary).is_empty());
    }

    #[test]
    fn suggestions_come_after_all_other_advisories() {
        // savings 100 < target 200, and LowSavingsRate also fires
        let summary = analyze(1000.0, &[(FOOD, 900.0)], 2400.0);
        let found = kinds(&summary);
        let last = found.last().copied();
        assert_eq!(last, Some(AdvisoryKind::GoalGapSuggestion));
        assert!(found.contains(&AdvisoryKind::LowSavingsRate));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Worked examples
// ═══════════════════════════════════════════════════════════════════

mod worked_examples {
    use super::*;

    #[test]
    fn example_typical_household() {
        let summary = analyze(
            5000.0,
            &[
                (HOUSING, 1600.0),
                (TRANSPORTATION, 300.0),
                (FOOD, 500.0),
                (UTILITIES, 200.0),
            ],
            6000.0,
        );
        assert_close(summary.total_expenses, 2600.0);
        assert_close(summary.monthly_savings, 2400.0);
        assert_close(summary.savings_ratio, 48.0);
        assert_close(summary.needs_ratio, 46.0);
        assert_close(summary.wants_ratio, 6.0);

        let found = kinds(&summary);
        assert!(!found.contains(&AdvisoryKind::EssentialOverspend));
        assert!(!found.contains(&AdvisoryKind::LowSavingsRate));
        // 1600 > 0.30 * 5000 = 1500
        assert!(found.contains(&AdvisoryKind::HousingOverload));
    }

    #[test]
    fn example_zero_income() {
        let summary = analyze(0.0, &[(HOUSING, 0.0)], 1000.0);
        assert_eq!(summary.savings_ratio, 0.0);
        assert_eq!(summary.needs_ratio, 0.0);
        assert_eq!(summary.wants_ratio, 0.0);
        assert!(summary.advisories.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ProjectionService
// ═══════════════════════════════════════════════════════════════════

mod projection {
    use super::*;

    #[test]
    fn produces_exactly_horizon_rows() {
        let summary = analyze(1000.0, &[(FOOD, 800.0)], 2400.0);
        let table = ProjectionService::new().project(&summary, 12);
        assert_eq!(table.len(), 12);
        for (i, row) in table.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
        }
    }

    #[test]
    fn zero_horizon_yields_empty_table() {
        let summary = analyze(1000.0, &[(FOOD, 800.0)], 2400.0);
        assert!(ProjectionService::new().project(&summary, 0).is_empty());
    }

    #[test]
    fn cumulative_columns_step_by_constant_increments() {
        let summary = analyze(1000.0, &[(FOOD, 700.0)], 2400.0);
        let table = ProjectionService::new().project(&summary, 12);
        let monthly_target = 2400.0 / 12.0;
        for row in &table {
            assert_close(row.target_cumulative, monthly_target * f64::from(row.period));
            assert_close(
                row.projected_cumulative,
                summary.monthly_savings * f64::from(row.period),
            );
            assert_close(row.monthly_target, monthly_target);
            assert_close(row.current_rate, summary.monthly_savings);
            assert_close(row.gap, summary.monthly_savings - monthly_target);
        }
    }

    #[test]
    fn example_on_target_household() {
        // savings 200, goal 2400 -> target 200, gap 0 everywhere
        let summary = analyze(1000.0, &[(FOOD, 800.0)], 2400.0);
        let table = ProjectionService::new().project(&summary, 12);
        assert_eq!(table.len(), 12);
        for row in &table {
            assert_close(row.monthly_target, 200.0);
            assert_close(row.gap, 0.0);
            assert_close(row.target_cumulative, row.projected_cumulative);
        }
    }

    #[test]
    fn negative_savings_project_a_declining_trajectory() {
        let summary = analyze(1000.0, &[(HOUSING, 1300.0)], 1200.0);
        let table = ProjectionService::new().project(&summary, 6);
        assert_close(table[0].projected_cumulative, -300.0);
        assert_close(table[5].projected_cumulative, -1800.0);
        for row in &table {
            assert!(row.gap < 0.0);
        }
    }

    #[test]
    fn non_default_horizon_divides_goal_accordingly() {
        let summary = analyze(1000.0, &[(FOOD, 400.0)], 2400.0);
        let table = ProjectionService::new().project(&summary, 6);
        assert_eq!(table.len(), 6);
        assert_close(table[0].monthly_target, 400.0);
        assert_close(table[5].target_cumulative, 2400.0);
    }

    #[test]
    fn idempotent_over_equal_snapshots() {
        let s = snapshot(1000.0, &[(FOOD, 800.0)], 2400.0);
        let service = BudgetService::new();
        let projector = ProjectionService::new();
        let first = projector.project(&service.analyze(&s, "USD"), 12);
        let second = projector.project(&service.analyze(&s, "USD"), 12);
        assert_eq!(first, second);
    }
}
