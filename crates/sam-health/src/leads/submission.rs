use crate::calculator::HealthCheckResult;
use serde::Serialize;

/// Value of the `form-name` field the static-site form handler routes on.
pub const LEAD_FORM_NAME: &str = "sam-calculator";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid e-mail address")]
pub struct InvalidEmail(pub String);

/// Checks the shape of an address: one `@`, a non-empty local part and a
/// dotted domain, no whitespace. Returns the trimmed address.
pub fn validate_email(raw: &str) -> Result<String, InvalidEmail> {
    let email = raw.trim();
    let invalid = || InvalidEmail(raw.to_string());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(char::is_whitespace)
        || domain.starts_with('.')
        || domain.ends_with('.')
        || domain.contains("..")
        || !domain.contains('.')
    {
        return Err(invalid());
    }

    Ok(email.to_string())
}

/// Payload posted to the lead form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub email: String,
    pub score: u8,
    pub compliance: String,
    pub audit: String,
    pub shelfware: String,
}

impl LeadSubmission {
    pub fn new(email: &str, result: &HealthCheckResult) -> Result<Self, InvalidEmail> {
        Ok(Self {
            email: validate_email(email)?,
            score: result.total_score,
            compliance: result.compliance.formatted_value.clone(),
            audit: result.audit.formatted_value.clone(),
            shelfware: result.shelfware.formatted_value.clone(),
        })
    }

    /// Form fields in submission order, ready for URL encoding.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("form-name", LEAD_FORM_NAME.to_string()),
            ("email", self.email.clone()),
            ("score", self.score.to_string()),
            ("compliance", self.compliance.clone()),
            ("audit", self.audit.clone()),
            ("shelfware", self.shelfware.clone()),
        ]
    }
}
