//! SAM health-check calculator: input boundary, KPI scoring and the
//! composite health score.

pub mod dashboard;
mod format;
mod import;
mod input;
mod kpi;
mod rules;
pub mod session;

#[cfg(test)]
mod tests;

pub use dashboard::{DashboardView, DomainModule, HealthBand, KpiView, ModuleView};
pub use format::{euro, percent};
pub use import::{ImportError, InputImporter};
pub use input::{CalculatorInput, Industry, InputError, InputField};
pub use kpi::{KpiKind, KpiResult, KpiStatus};
pub use rules::{AgilityRules, CostBenchmarks, ScoringRules};
pub use session::{CalculatorSession, SessionEvent, SubscriptionId};

use serde::{Deserialize, Serialize};

/// Stateless scorer applying a [`ScoringRules`] set to calculator input.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores the full input record. The record is sanitized first, so the
    /// result never depends on values the input boundary would have refused.
    pub fn score(&self, input: &CalculatorInput) -> HealthCheckResult {
        let input = input.sanitized();

        let compliance = rules::score_compliance(&input, &self.rules);
        let audit = rules::score_audit(&input);
        let shelfware = rules::score_shelfware(&input, &self.rules);
        let cost_per_user = rules::score_cost_per_user(&input, &self.rules);
        let true_up = rules::score_true_up(&input, &self.rules);
        let agility = rules::score_agility(&input, &self.rules);

        let (total_score, has_data) = composite_score(&[
            &compliance,
            &audit,
            &shelfware,
            &cost_per_user,
            &true_up,
            &agility,
        ]);

        HealthCheckResult {
            industry: input.industry,
            compliance,
            audit,
            shelfware,
            cost_per_user,
            true_up,
            agility,
            total_score,
            has_data,
        }
    }
}

/// Unweighted mean of the scores of every KPI that has data, rounded to the
/// nearest integer.
fn composite_score(kpis: &[&KpiResult]) -> (u8, bool) {
    let active: Vec<f64> = kpis
        .iter()
        .filter(|kpi| kpi.has_data())
        .map(|kpi| kpi.score)
        .collect();

    if active.is_empty() {
        return (0, false);
    }

    let mean = active.iter().sum::<f64>() / active.len() as f64;
    (mean.round().clamp(0.0, 100.0) as u8, true)
}

/// Scores `input` with the published default thresholds.
pub fn evaluate(input: &CalculatorInput) -> HealthCheckResult {
    ScoringEngine::default().score(input)
}

/// The six KPI results plus the composite health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub industry: Industry,
    pub compliance: KpiResult,
    pub audit: KpiResult,
    pub shelfware: KpiResult,
    pub cost_per_user: KpiResult,
    pub true_up: KpiResult,
    pub agility: KpiResult,
    pub total_score: u8,
    pub has_data: bool,
}

impl HealthCheckResult {
    /// KPI results in dashboard and report order.
    pub fn kpis(&self) -> [&KpiResult; 6] {
        [
            &self.compliance,
            &self.audit,
            &self.shelfware,
            &self.cost_per_user,
            &self.true_up,
            &self.agility,
        ]
    }

    pub fn kpi(&self, kind: KpiKind) -> &KpiResult {
        match kind {
            KpiKind::ComplianceRate => &self.compliance,
            KpiKind::AuditSuccess => &self.audit,
            KpiKind::ShelfwareQuote => &self.shelfware,
            KpiKind::CostPerUser => &self.cost_per_user,
            KpiKind::TrueUpRatio => &self.true_up,
            KpiKind::Agility => &self.agility,
        }
    }

    pub fn band(&self) -> HealthBand {
        HealthBand::from_score(self.total_score)
    }

    /// Number of KPIs currently in the red.
    pub fn critical_count(&self) -> usize {
        self.kpis()
            .iter()
            .filter(|kpi| kpi.status == KpiStatus::Red)
            .count()
    }

    pub fn dashboard(&self) -> DashboardView {
        dashboard::build_dashboard(self)
    }
}
