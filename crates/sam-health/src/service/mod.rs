//! Health-check service backing the HTTP API: scoring, report rendering, lead
//! capture and the current calculator content.

mod router;

#[cfg(test)]
mod tests;

pub use router::sam_router;

use std::sync::{Arc, PoisonError, RwLock};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::calculator::{CalculatorInput, DashboardView, HealthCheckResult, ScoringEngine};
use crate::content::{load_sam_config_or_default, ContentProvider, SamConfig};
use crate::leads::{LeadCaptureError, LeadCaptureOutcome, LeadCaptureService, LeadGateway};
use crate::report::{ReportDocument, ReportError, ReportGenerator, ReportSink};

/// Scored result together with the dashboard derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    pub result: HealthCheckResult,
    pub dashboard: DashboardView,
}

pub struct HealthCheckService<S, G> {
    engine: Arc<ScoringEngine>,
    generator: Arc<ReportGenerator>,
    leads: LeadCaptureService<S, G>,
    config: RwLock<SamConfig>,
}

impl<S, G> HealthCheckService<S, G>
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    pub fn new(
        engine: ScoringEngine,
        generator: ReportGenerator,
        sink: Arc<S>,
        gateway: Arc<G>,
        config: SamConfig,
    ) -> Self {
        let generator = Arc::new(generator);
        let leads = LeadCaptureService::new(generator.clone(), sink, gateway);
        Self {
            engine: Arc::new(engine),
            generator,
            leads,
            config: RwLock::new(config),
        }
    }

    pub fn score(&self, input: &CalculatorInput) -> ScoreView {
        let result = self.engine.score(input);
        let dashboard = result.dashboard();
        ScoreView { result, dashboard }
    }

    pub fn report(
        &self,
        input: &CalculatorInput,
        issued_on: NaiveDate,
    ) -> Result<ReportDocument, ReportError> {
        let result = self.engine.score(input);
        self.generator.generate(&result, &self.config(), issued_on)
    }

    /// Runs the lead flow for `input`. Performs blocking I/O.
    pub fn capture_lead(
        &self,
        email: &str,
        input: &CalculatorInput,
        issued_on: NaiveDate,
    ) -> Result<LeadCaptureOutcome, LeadCaptureError> {
        let result = self.engine.score(input);
        self.leads
            .capture(email, &result, &self.config(), issued_on)
    }

    pub fn config(&self) -> SamConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current content. The last write wins.
    pub fn replace_config(&self, config: SamConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
    }

    /// Reloads content from `provider`, keeping the service usable when the
    /// source is unavailable. Performs blocking I/O.
    pub fn reload_config(&self, provider: &dyn ContentProvider) -> SamConfig {
        let config = load_sam_config_or_default(provider);
        info!(
            contact = config.contact.is_some(),
            next_steps = config.next_steps.is_some(),
            "calculator content reloaded"
        );
        self.replace_config(config.clone());
        config
    }
}
