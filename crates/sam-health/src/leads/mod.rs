//! Lead capture: e-mail the report request to the sales team while the user
//! downloads the PDF.

mod gateway;
mod service;
mod submission;

pub use gateway::{HttpLeadGateway, LeadError, LeadGateway};
pub use service::{
    LeadCaptureError, LeadCaptureOutcome, LeadCaptureService, NotificationStatus, ReportDelivery,
    NOTIFICATION_FAILED_MESSAGE,
};
pub use submission::{validate_email, InvalidEmail, LeadSubmission, LEAD_FORM_NAME};
