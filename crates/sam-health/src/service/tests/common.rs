use axum::response::Response;
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::calculator::{CalculatorInput, Industry, ScoringEngine};
use crate::content::{ContactInfo, SamConfig};
use crate::leads::{LeadError, LeadGateway, LeadSubmission};
use crate::report::{DeliveryError, ReportDocument, ReportGenerator, ReportSink};
use crate::service::HealthCheckService;

#[derive(Default)]
pub(super) struct MemorySink {
    pub(super) documents: Mutex<Vec<ReportDocument>>,
}

impl ReportSink for MemorySink {
    fn deliver(&self, document: &ReportDocument) -> Result<String, DeliveryError> {
        let mut guard = self.documents.lock().expect("sink mutex");
        guard.push(document.clone());
        Ok(format!("memory://{}", document.file_name))
    }
}

#[derive(Default)]
pub(super) struct MemoryGateway {
    pub(super) leads: Mutex<Vec<LeadSubmission>>,
}

impl LeadGateway for MemoryGateway {
    fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        self.leads.lock().expect("gateway mutex").push(lead.clone());
        Ok(())
    }
}

pub(super) type TestService = HealthCheckService<MemorySink, MemoryGateway>;

pub(super) fn build_service() -> (TestService, Arc<MemorySink>, Arc<MemoryGateway>) {
    let sink = Arc::new(MemorySink::default());
    let gateway = Arc::new(MemoryGateway::default());
    let service = HealthCheckService::new(
        ScoringEngine::default(),
        ReportGenerator::default(),
        sink.clone(),
        gateway.clone(),
        sample_config(),
    );
    (service, sink, gateway)
}

pub(super) fn sample_config() -> SamConfig {
    SamConfig {
        contact: Some(ContactInfo {
            name: "Jana Berger".to_string(),
            role: "SAM Consultant".to_string(),
            email: "jana.berger@example.com".to_string(),
            phone: "+49 89 123456".to_string(),
            ..ContactInfo::default()
        }),
        next_steps: None,
    }
}

pub(super) fn sample_input() -> CalculatorInput {
    CalculatorInput {
        licensed_software: 800,
        installed_software: 1000,
        passed_audits: 1,
        total_audits: 2,
        unused_licenses: 150,
        bought_licenses: 1000,
        total_license_cost: 700_000.0,
        user_count: 1000,
        industry: Industry::Industry,
        true_up_cost: 20_000.0,
        original_order: 100_000.0,
        days_standard: 10,
        days_new: 40,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("serialize body"),
        ))
        .expect("request builds")
}
