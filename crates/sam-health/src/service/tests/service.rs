use super::common::*;
use chrono::NaiveDate;

use crate::calculator::{HealthBand, KpiStatus};
use crate::content::{ContentError, ContentProvider, SamConfig};
use crate::leads::{LeadCaptureError, NotificationStatus, ReportDelivery};

struct BrokenContent;

impl ContentProvider for BrokenContent {
    fn sam_config(&self) -> Result<SamConfig, ContentError> {
        Err(ContentError::Transport("connection refused".to_string()))
    }
}

fn issued_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

#[test]
fn score_returns_result_and_dashboard() {
    let (service, _, _) = build_service();

    let view = service.score(&sample_input());

    assert!(view.result.has_data);
    assert_eq!(view.result.band(), HealthBand::Critical);
    assert_eq!(view.dashboard.total_score, view.result.total_score);
    assert_eq!(view.dashboard.critical_count, 5);
    assert_eq!(view.result.cost_per_user.status, KpiStatus::Red);
}

#[test]
fn report_uses_current_config() {
    let (service, _, _) = build_service();

    let with_contact = service
        .report(&sample_input(), issued_on())
        .expect("report renders");
    service.replace_config(SamConfig::default());
    let without_contact = service
        .report(&sample_input(), issued_on())
        .expect("report renders");

    assert_eq!(with_contact.file_name, "Novartum_SAM_Report.pdf");
    assert!(String::from_utf8_lossy(&with_contact.bytes).contains("(Jana Berger)"));
    assert!(!String::from_utf8_lossy(&without_contact.bytes).contains("(Jana Berger)"));
}

#[test]
fn capture_lead_delivers_report_and_notifies() {
    let (service, sink, gateway) = build_service();

    let outcome = service
        .capture_lead("cio@example.com", &sample_input(), issued_on())
        .expect("lead captured");

    assert_eq!(outcome.notification, NotificationStatus::Sent);
    assert_eq!(
        outcome.report,
        ReportDelivery::Delivered {
            file_name: "Novartum_SAM_Report.pdf".to_string(),
            location: "memory://Novartum_SAM_Report.pdf".to_string(),
        }
    );
    assert_eq!(
        outcome.message,
        "Ihr Report wurde heruntergeladen und per E-Mail an cio@example.com gesendet."
    );
    assert_eq!(sink.documents.lock().expect("sink mutex").len(), 1);
    let leads = gateway.leads.lock().expect("gateway mutex");
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].compliance, "80.0%");
}

#[test]
fn capture_lead_rejects_invalid_email_without_side_effects() {
    let (service, sink, gateway) = build_service();

    match service.capture_lead("not-an-email", &sample_input(), issued_on()) {
        Err(LeadCaptureError::InvalidEmail(err)) => assert_eq!(err.0, "not-an-email"),
        other => panic!("expected invalid email, got {other:?}"),
    }
    assert!(sink.documents.lock().expect("sink mutex").is_empty());
    assert!(gateway.leads.lock().expect("gateway mutex").is_empty());
}

#[test]
fn reload_falls_back_to_empty_config() {
    let (service, _, _) = build_service();
    assert!(service.config().contact.is_some());

    let config = service.reload_config(&BrokenContent);

    assert!(config.is_empty());
    assert!(service.config().is_empty());
}
