//! Branded PDF report of a health-check result.

mod fonts;
mod layout;
mod pdf;
mod sink;

pub use sink::{DeliveryError, FsReportSink, ReportSink};

use crate::calculator::HealthCheckResult;
use crate::content::SamConfig;
use chrono::NaiveDate;
use layout::ReportLayout;
use pdf::DocumentInfo;
use tracing::debug;

pub const DEFAULT_BRAND: &str = "Novartum";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("brand name '{0}' cannot be used in a file name")]
    InvalidBrand(String),
    #[error("report layout has no page to draw on")]
    NoPage,
    #[error("failed to render report content: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("failed to assemble report: {0}")]
    Io(#[from] std::io::Error),
}

/// Brand identity printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBranding {
    pub name: String,
    pub website: String,
    pub email: String,
}

impl ReportBranding {
    /// Surrounding whitespace is dropped from `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        let domain = name.to_lowercase().replace(char::is_whitespace, "");
        Self {
            website: format!("www.{domain}.com"),
            email: format!("info@{domain}.com"),
            name,
        }
    }

    /// Lower-case word mark shown in the header band.
    pub fn wordmark(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn file_name(&self) -> String {
        format!("{}_SAM_Report.pdf", self.name.replace(char::is_whitespace, "_"))
    }

    fn validate(&self) -> Result<(), ReportError> {
        let unsafe_char = |c: char| c == '/' || c == '\\' || c.is_control();
        if self.name.is_empty() || self.name.contains(unsafe_char) {
            return Err(ReportError::InvalidBrand(self.name.clone()));
        }
        Ok(())
    }
}

impl Default for ReportBranding {
    fn default() -> Self {
        Self::new(DEFAULT_BRAND)
    }
}

/// A rendered report ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    branding: ReportBranding,
}

impl ReportGenerator {
    pub fn new(branding: ReportBranding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &ReportBranding {
        &self.branding
    }

    /// Renders header, score banner, KPI table, the optional contact and
    /// next-steps blocks, and a footer on every page.
    pub fn generate(
        &self,
        result: &HealthCheckResult,
        config: &SamConfig,
        issued_on: NaiveDate,
    ) -> Result<ReportDocument, ReportError> {
        self.branding.validate()?;

        let mut layout = ReportLayout::new(&self.branding)?;
        layout.header(issued_on)?;
        layout.score_banner(result)?;
        layout.kpi_table(result)?;
        if let Some(contact) = &config.contact {
            layout.contact(contact)?;
        }
        if let Some(next_steps) = &config.next_steps {
            layout.next_steps(next_steps)?;
        }

        let canvas = layout.into_canvas();
        let page_count = canvas.page_count();
        let bytes = canvas.finish(&DocumentInfo {
            title: format!("{} SAM Health Check", self.branding.name),
            author: self.branding.name.clone(),
            creation_date: format!("D:{}", issued_on.format("%Y%m%d")),
        })?;

        let file_name = self.branding.file_name();
        debug!(
            file_name = %file_name,
            page_count,
            size = bytes.len(),
            total_score = result.total_score,
            "health check report rendered"
        );

        Ok(ReportDocument {
            file_name,
            bytes,
            page_count,
        })
    }
}
