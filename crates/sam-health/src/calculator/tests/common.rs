use crate::calculator::{CalculatorInput, Industry, ScoringEngine};

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

/// A mid-sized customer with data in every domain.
pub(super) fn populated_input() -> CalculatorInput {
    CalculatorInput {
        licensed_software: 960,
        installed_software: 1000,
        passed_audits: 2,
        total_audits: 3,
        unused_licenses: 80,
        bought_licenses: 1000,
        total_license_cost: 540_000.0,
        user_count: 900,
        industry: Industry::Industry,
        true_up_cost: 5_000.0,
        original_order: 100_000.0,
        days_standard: 3,
        days_new: 25,
    }
}

pub(super) fn compliance_only(licensed: u32, installed: u32) -> CalculatorInput {
    CalculatorInput {
        licensed_software: licensed,
        installed_software: installed,
        ..CalculatorInput::default()
    }
}
