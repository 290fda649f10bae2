use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::gateway::LeadGateway;
use super::submission::{InvalidEmail, LeadSubmission};
use crate::calculator::HealthCheckResult;
use crate::content::SamConfig;
use crate::report::{ReportGenerator, ReportSink};

pub const NOTIFICATION_FAILED_MESSAGE: &str =
    "Der Report wurde heruntergeladen, aber die E-Mail konnte nicht gesendet werden.";

/// What happened to the PDF download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportDelivery {
    Delivered { file_name: String, location: String },
    Failed { reason: String },
}

/// What happened to the lead notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadCaptureOutcome {
    pub email: String,
    pub report: ReportDelivery,
    pub notification: NotificationStatus,
    /// Message shown to the user once the flow has finished.
    pub message: String,
}

impl LeadCaptureOutcome {
    pub fn notified(&self) -> bool {
        self.notification == NotificationStatus::Sent
    }
}

/// Error raised before any side effect took place.
#[derive(Debug, thiserror::Error)]
pub enum LeadCaptureError {
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmail),
}

/// Service composing report generation, report delivery and lead submission.
///
/// Only a malformed address aborts the flow. Report and notification failures
/// are logged and reported in the outcome.
pub struct LeadCaptureService<S, G> {
    generator: Arc<ReportGenerator>,
    sink: Arc<S>,
    gateway: Arc<G>,
}

impl<S, G> LeadCaptureService<S, G>
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    pub fn new(generator: Arc<ReportGenerator>, sink: Arc<S>, gateway: Arc<G>) -> Self {
        Self {
            generator,
            sink,
            gateway,
        }
    }

    pub fn capture(
        &self,
        email: &str,
        result: &HealthCheckResult,
        config: &SamConfig,
        issued_on: NaiveDate,
    ) -> Result<LeadCaptureOutcome, LeadCaptureError> {
        let lead = LeadSubmission::new(email, result)?;

        let report = self.deliver_report(result, config, issued_on);

        let notification = match self.gateway.submit(&lead) {
            Ok(()) => NotificationStatus::Sent,
            Err(err) => {
                warn!(error = %err, "lead submission failed");
                NotificationStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        let message = match notification {
            NotificationStatus::Sent => format!(
                "Ihr Report wurde heruntergeladen und per E-Mail an {} gesendet.",
                lead.email
            ),
            NotificationStatus::Failed { .. } => NOTIFICATION_FAILED_MESSAGE.to_string(),
        };

        info!(
            score = lead.score,
            report_delivered = matches!(report, ReportDelivery::Delivered { .. }),
            notified = notification == NotificationStatus::Sent,
            "lead captured"
        );

        Ok(LeadCaptureOutcome {
            email: lead.email,
            report,
            notification,
            message,
        })
    }

    fn deliver_report(
        &self,
        result: &HealthCheckResult,
        config: &SamConfig,
        issued_on: NaiveDate,
    ) -> ReportDelivery {
        let delivered = self
            .generator
            .generate(result, config, issued_on)
            .map_err(|err| err.to_string())
            .and_then(|document| {
                self.sink
                    .deliver(&document)
                    .map(|location| (document.file_name, location))
                    .map_err(|err| err.to_string())
            });

        match delivered {
            Ok((file_name, location)) => ReportDelivery::Delivered {
                file_name,
                location,
            },
            Err(reason) => {
                warn!(error = %reason, "report download failed");
                ReportDelivery::Failed { reason }
            }
        }
    }
}
