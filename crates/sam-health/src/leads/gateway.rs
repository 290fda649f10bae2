use super::submission::LeadSubmission;
use crate::http_client::SharedClient;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead endpoint unreachable: {0}")]
    Transport(String),
    #[error("lead endpoint rejected the submission with status {status}")]
    Rejected { status: u16 },
    #[error("no lead endpoint configured")]
    NotConfigured,
}

/// Outbound hook delivering captured leads to the form backend.
pub trait LeadGateway: Send + Sync {
    fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError>;
}

/// Posts leads as `application/x-www-form-urlencoded` to a form endpoint.
///
/// Blocking; async callers should run it on a blocking thread.
#[derive(Debug, Clone)]
pub struct HttpLeadGateway {
    endpoint: String,
    client: SharedClient,
}

impl HttpLeadGateway {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: SharedClient::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LeadGateway for HttpLeadGateway {
    fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        let client = self
            .client
            .get()
            .map_err(|err| LeadError::Transport(err.to_string()))?;

        let response = client
            .post(&self.endpoint)
            .form(&lead.form_fields())
            .send()
            .map_err(|err| LeadError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(endpoint = %self.endpoint, score = lead.score, "lead submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{evaluate, CalculatorInput};
    use mockito::Matcher;

    fn lead() -> LeadSubmission {
        let result = evaluate(&CalculatorInput {
            passed_audits: 3,
            total_audits: 3,
            ..CalculatorInput::default()
        });
        LeadSubmission::new("cio@example.com", &result).expect("valid email")
    }

    #[test]
    fn posts_url_encoded_form() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/leads")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("form-name".into(), "sam-calculator".into()),
                Matcher::UrlEncoded("email".into(), "cio@example.com".into()),
                Matcher::UrlEncoded("audit".into(), "100%".into()),
            ]))
            .with_status(200)
            .expect(2)
            .create();

        let gateway = HttpLeadGateway::new(format!("{}/leads", server.url()));
        gateway.submit(&lead()).expect("lead accepted");
        gateway.submit(&lead()).expect("client reused");

        mock.assert();
    }

    #[test]
    fn non_success_status_is_rejected() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/leads").with_status(503).create();

        let gateway = HttpLeadGateway::new(format!("{}/leads", server.url()));

        assert!(matches!(
            gateway.submit(&lead()),
            Err(LeadError::Rejected { status: 503 })
        ));
    }
}
