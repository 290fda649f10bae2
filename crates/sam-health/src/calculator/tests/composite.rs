use super::common::*;
use crate::calculator::{evaluate, CalculatorInput, HealthBand, KpiStatus};

#[test]
fn all_zero_input_has_no_data() {
    let result = evaluate(&CalculatorInput::default());

    assert_eq!(result.total_score, 0);
    assert!(!result.has_data);
    assert!(result
        .kpis()
        .iter()
        .all(|kpi| kpi.formatted_value == "-" && kpi.status == KpiStatus::Gray));
}

#[test]
fn composite_is_rounded_mean_of_active_kpis() {
    let result = engine().score(&populated_input());

    let active: Vec<f64> = result
        .kpis()
        .iter()
        .filter(|kpi| kpi.status != KpiStatus::Gray)
        .map(|kpi| kpi.score)
        .collect();
    let expected = (active.iter().sum::<f64>() / active.len() as f64).round() as u8;

    assert_eq!(active.len(), 6);
    assert_eq!(result.total_score, expected);
    assert_eq!(result.total_score, 78);
    assert!(result.has_data);
    assert_eq!(result.band(), HealthBand::Optimizable);
}

#[test]
fn gray_kpis_do_not_dilute_the_composite() {
    let result = engine().score(&CalculatorInput {
        licensed_software: 950,
        installed_software: 1000,
        unused_licenses: 0,
        bought_licenses: 1000,
        ..CalculatorInput::default()
    });

    // (95 + 100) / 2 rounds half up
    assert_eq!(result.total_score, 98);
    assert_eq!(result.band(), HealthBand::Excellent);
}

#[test]
fn scoring_is_idempotent() {
    let engine = engine();
    let input = populated_input();

    let first = engine.score(&input);
    let second = engine.score(&input);

    assert_eq!(first, second);
}

#[test]
fn out_of_range_records_are_sanitized_before_scoring() {
    let result = engine().score(&CalculatorInput {
        unused_licenses: 2_000,
        bought_licenses: 1_000,
        total_license_cost: f64::NAN,
        user_count: 10,
        ..CalculatorInput::default()
    });

    assert_eq!(result.shelfware.value, 100.0);
    assert_eq!(result.cost_per_user.value, 0.0);
    assert_eq!(result.cost_per_user.status, KpiStatus::Green);
    assert_eq!(result.cost_per_user.formatted_value, "0\u{a0}€");
}
