use super::format::{euro, percent};
use super::input::{CalculatorInput, Industry};
use super::kpi::{KpiKind, KpiResult, KpiStatus};
use serde::{Deserialize, Serialize};

/// Business thresholds behind the six KPIs.
///
/// The defaults are the benchmarks published with the calculator. They are
/// heuristics agreed with consultants, so they are kept as data rather than
/// baked into the scoring functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Compliance strictly above this percentage is green.
    pub compliance_green_above: f64,
    /// Compliance at or above this percentage (and not green) is yellow.
    pub compliance_yellow_from: f64,
    /// Shelfware strictly below this percentage is green.
    pub shelfware_green_below: f64,
    /// Shelfware at or below this percentage (and not green) is yellow.
    pub shelfware_yellow_up_to: f64,
    pub shelfware_penalty_per_point: f64,
    /// True-up ratio strictly below this percentage is green.
    pub true_up_green_below: f64,
    pub true_up_penalty_per_point: f64,
    pub cost_benchmarks: CostBenchmarks,
    pub cost_score_within_benchmark: f64,
    pub cost_score_above_benchmark: f64,
    pub agility: AgilityRules,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            compliance_green_above: 98.0,
            compliance_yellow_from: 95.0,
            shelfware_green_below: 5.0,
            shelfware_yellow_up_to: 10.0,
            shelfware_penalty_per_point: 5.0,
            true_up_green_below: 10.0,
            true_up_penalty_per_point: 5.0,
            cost_benchmarks: CostBenchmarks::default(),
            cost_score_within_benchmark: 95.0,
            cost_score_above_benchmark: 40.0,
            agility: AgilityRules::default(),
        }
    }
}

/// Annual license cost per user considered healthy, in euros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenchmarks {
    pub finance: f64,
    pub industry: f64,
    pub other: f64,
}

impl CostBenchmarks {
    pub fn for_industry(&self, industry: Industry) -> f64 {
        match industry {
            Industry::Finance => self.finance,
            Industry::Industry => self.industry,
            Industry::Other => self.other,
        }
    }
}

impl Default for CostBenchmarks {
    fn default() -> Self {
        Self {
            finance: 1200.0,
            industry: 600.0,
            other: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgilityRules {
    pub standard_days_below: u32,
    pub new_days_below: u32,
    pub fast_points: u32,
    pub slow_points: u32,
    pub green_from: u32,
    pub yellow_from: u32,
}

impl Default for AgilityRules {
    fn default() -> Self {
        Self {
            standard_days_below: 5,
            new_days_below: 20,
            fast_points: 50,
            slow_points: 25,
            green_from: 90,
            yellow_from: 50,
        }
    }
}

fn ratio_percent(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator * 100.0
}

pub(crate) fn compliance_status(value: f64, rules: &ScoringRules) -> KpiStatus {
    if value > rules.compliance_green_above {
        KpiStatus::Green
    } else if value >= rules.compliance_yellow_from {
        KpiStatus::Yellow
    } else {
        KpiStatus::Red
    }
}

pub(crate) fn shelfware_status(value: f64, rules: &ScoringRules) -> KpiStatus {
    if value < rules.shelfware_green_below {
        KpiStatus::Green
    } else if value <= rules.shelfware_yellow_up_to {
        KpiStatus::Yellow
    } else {
        KpiStatus::Red
    }
}

pub(crate) fn score_compliance(input: &CalculatorInput, rules: &ScoringRules) -> KpiResult {
    let kind = KpiKind::ComplianceRate;
    if input.installed_software == 0 {
        return KpiResult::no_data(kind);
    }

    let value = ratio_percent(
        f64::from(input.licensed_software),
        f64::from(input.installed_software),
    );
    let status = compliance_status(value, rules);
    let message = match status {
        KpiStatus::Green => "Vorbildlich.",
        KpiStatus::Yellow => "Risiko vorhanden.",
        _ => "Kritisches Compliance-Gap.",
    };

    KpiResult::measured(
        kind,
        value,
        percent(value, 1),
        status,
        message,
        value.min(100.0),
    )
}

pub(crate) fn score_audit(input: &CalculatorInput) -> KpiResult {
    let kind = KpiKind::AuditSuccess;
    if input.total_audits == 0 {
        return KpiResult::no_data(kind);
    }

    let value = ratio_percent(
        f64::from(input.passed_audits),
        f64::from(input.total_audits),
    );
    let (status, message) = if input.passed_audits >= input.total_audits {
        (KpiStatus::Green, "Perfekte Bilanz.")
    } else {
        (KpiStatus::Red, "Finanzielles Risiko bei Audits.")
    };

    KpiResult::measured(kind, value, percent(value, 0), status, message, value)
}

pub(crate) fn score_shelfware(input: &CalculatorInput, rules: &ScoringRules) -> KpiResult {
    let kind = KpiKind::ShelfwareQuote;
    if input.bought_licenses == 0 {
        return KpiResult::no_data(kind);
    }

    let value = ratio_percent(
        f64::from(input.unused_licenses),
        f64::from(input.bought_licenses),
    );
    let status = shelfware_status(value, rules);
    let message = match status {
        KpiStatus::Green => "Hocheffiziente Nutzung.",
        KpiStatus::Yellow => "Optimierungspotenzial.",
        _ => "Hohe Kapitalbindung (Waste).",
    };
    let score = (100.0 - value * rules.shelfware_penalty_per_point).max(0.0);

    KpiResult::measured(kind, value, percent(value, 1), status, message, score)
}

pub(crate) fn score_cost_per_user(input: &CalculatorInput, rules: &ScoringRules) -> KpiResult {
    let kind = KpiKind::CostPerUser;
    if input.user_count == 0 {
        return KpiResult::no_data(kind);
    }

    let value = input.total_license_cost / f64::from(input.user_count);
    let limit = rules.cost_benchmarks.for_industry(input.industry);

    if value <= limit {
        KpiResult::measured(
            kind,
            value,
            euro(value),
            KpiStatus::Green,
            "Im Branchen-Benchmark.",
            rules.cost_score_within_benchmark,
        )
    } else {
        KpiResult::measured(
            kind,
            value,
            euro(value),
            KpiStatus::Red,
            format!("Über Benchmark (> {}€).", limit),
            rules.cost_score_above_benchmark,
        )
    }
}

pub(crate) fn score_true_up(input: &CalculatorInput, rules: &ScoringRules) -> KpiResult {
    let kind = KpiKind::TrueUpRatio;
    if input.original_order == 0.0 {
        return KpiResult::no_data(kind);
    }

    let value = ratio_percent(input.true_up_cost, input.original_order);
    let (status, message) = if value < rules.true_up_green_below {
        (KpiStatus::Green, "Planungssicher.")
    } else {
        (KpiStatus::Red, "Schlechte Planung / Nachzahlungen.")
    };
    let score = (100.0 - value * rules.true_up_penalty_per_point).max(0.0);

    KpiResult::measured(kind, value, percent(value, 1), status, message, score)
}

pub(crate) fn score_agility(input: &CalculatorInput, rules: &ScoringRules) -> KpiResult {
    let kind = KpiKind::Agility;
    if input.days_standard == 0 && input.days_new == 0 {
        return KpiResult::no_data(kind);
    }

    let agility = &rules.agility;
    let standard_points = if input.days_standard < agility.standard_days_below {
        agility.fast_points
    } else {
        agility.slow_points
    };
    let new_points = if input.days_new < agility.new_days_below {
        agility.fast_points
    } else {
        agility.slow_points
    };
    let points = standard_points + new_points;

    let status = if points >= agility.green_from {
        KpiStatus::Green
    } else if points >= agility.yellow_from {
        KpiStatus::Yellow
    } else {
        KpiStatus::Red
    };
    let message = if status == KpiStatus::Green {
        "Agile IT-Prozesse."
    } else {
        "Verzögerungen im Business."
    };

    KpiResult::measured(
        kind,
        f64::from(points),
        format!("{} / {} Tage", input.days_standard, input.days_new),
        status,
        message,
        f64::from(points),
    )
}
