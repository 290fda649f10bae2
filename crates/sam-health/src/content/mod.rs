//! Externally supplied calculator content: expert contact and next steps.
//!
//! The configuration only decorates the report. Scores never depend on it,
//! so a missing or broken source degrades to an empty [`SamConfig`].

mod http;

pub use http::HttpContentProvider;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Relative location of the calculator configuration inside a content root.
pub const SAM_CONFIG_PATH: &str = "sam-calculator/config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<NextSteps>,
}

impl SamConfig {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        serde_json::from_str(raw).map_err(ContentError::Malformed)
    }

    pub fn is_empty(&self) -> bool {
        self.contact.is_none() && self.next_steps.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub title: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    /// Portrait URL. Only the web dashboard shows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextSteps {
    pub title: String,
    pub steps: Vec<NextStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NextStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content not found at {0}")]
    NotFound(String),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("content request failed: {0}")]
    Transport(String),
    #[error("content request returned status {status}")]
    Status { status: u16 },
    #[error("malformed calculator config: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Source of the calculator configuration.
pub trait ContentProvider: Send + Sync {
    fn sam_config(&self) -> Result<SamConfig, ContentError>;
}

/// Reads `<root>/sam-calculator/config.json` from disk.
#[derive(Debug, Clone)]
pub struct FsContentProvider {
    root: PathBuf,
}

impl FsContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(SAM_CONFIG_PATH)
    }
}

impl ContentProvider for FsContentProvider {
    fn sam_config(&self) -> Result<SamConfig, ContentError> {
        let path = self.config_path();
        let raw = std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ContentError::NotFound(path.display().to_string()),
            _ => ContentError::Io(err),
        })?;
        SamConfig::from_json(&raw)
    }
}

/// Provider that always yields the empty configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentProvider for NoContent {
    fn sam_config(&self) -> Result<SamConfig, ContentError> {
        Ok(SamConfig::default())
    }
}

/// Where the calculator configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Directory(PathBuf),
    Remote(String),
    None,
}

impl ContentSource {
    pub fn provider(&self) -> Box<dyn ContentProvider> {
        match self {
            Self::Directory(root) => Box::new(FsContentProvider::new(root.clone())),
            Self::Remote(base_url) => Box::new(HttpContentProvider::new(base_url.clone())),
            Self::None => Box::new(NoContent),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Directory(root) => Path::new(root).join(SAM_CONFIG_PATH).display().to_string(),
            Self::Remote(base_url) => http::config_url(base_url),
            Self::None => "none".to_string(),
        }
    }
}

/// Loads the configuration, falling back to the empty one on any failure.
pub fn load_sam_config_or_default(provider: &dyn ContentProvider) -> SamConfig {
    match provider.sam_config() {
        Ok(config) => {
            debug!(
                contact = config.contact.is_some(),
                next_steps = config.next_steps.is_some(),
                "calculator config loaded"
            );
            config
        }
        Err(err) => {
            warn!(error = %err, "calculator config unavailable, report omits contact details");
            SamConfig::default()
        }
    }
}
