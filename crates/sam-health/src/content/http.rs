use super::{ContentError, ContentProvider, SamConfig, SAM_CONFIG_PATH};
use crate::http_client::SharedClient;
use reqwest::StatusCode;

pub(crate) fn config_url(base_url: &str) -> String {
    format!("{}/content/{SAM_CONFIG_PATH}", base_url.trim_end_matches('/'))
}

/// Fetches the configuration from `<base>/content/sam-calculator/config.json`.
///
/// Uses the blocking client; async callers should run it on a blocking thread.
#[derive(Debug, Clone)]
pub struct HttpContentProvider {
    base_url: String,
    client: SharedClient,
}

impl HttpContentProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: SharedClient::default(),
        }
    }

    pub fn url(&self) -> String {
        config_url(&self.base_url)
    }
}

impl ContentProvider for HttpContentProvider {
    fn sam_config(&self) -> Result<SamConfig, ContentError> {
        let url = self.url();
        let client = self
            .client
            .get()
            .map_err(|err| ContentError::Transport(err.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .map_err(|err| ContentError::Transport(err.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ContentError::NotFound(url)),
            status if !status.is_success() => Err(ContentError::Status {
                status: status.as_u16(),
            }),
            _ => {
                let body = response
                    .text()
                    .map_err(|err| ContentError::Transport(err.to_string()))?;
                SamConfig::from_json(&body)
            }
        }
    }
}
