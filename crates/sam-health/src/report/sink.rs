use super::ReportDocument;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to store report {file_name}: {source}")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("report delivery unavailable: {0}")]
    Unavailable(String),
}

/// Destination of a rendered report, e.g. a download folder.
pub trait ReportSink: Send + Sync {
    /// Delivers the document and returns where it ended up.
    fn deliver(&self, document: &ReportDocument) -> Result<String, DeliveryError>;
}

/// Writes reports into a directory, overwriting earlier downloads of the same
/// name.
#[derive(Debug, Clone)]
pub struct FsReportSink {
    dir: PathBuf,
}

impl FsReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FsReportSink {
    fn deliver(&self, document: &ReportDocument) -> Result<String, DeliveryError> {
        let path = self.dir.join(&document.file_name);
        let io_error = |source| DeliveryError::Io {
            file_name: document.file_name.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        std::fs::write(&path, &document.bytes).map_err(io_error)?;

        let location = path.display().to_string();
        info!(location = %location, size = document.bytes.len(), "report stored");
        Ok(location)
    }
}
