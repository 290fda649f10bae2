use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use sam_health::calculator::{
    CalculatorInput, ImportError, Industry, InputField, InputImporter, ScoringEngine,
};
use sam_health::config::SamSettings;
use sam_health::content::SamConfig;
use sam_health::leads::{HttpLeadGateway, LeadError, LeadGateway, LeadSubmission};
use sam_health::report::{
    DeliveryError, FsReportSink, ReportDocument, ReportGenerator, ReportSink,
};
use sam_health::service::HealthCheckService;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Report destination chosen from `SAM_REPORT_DIR`.
#[derive(Debug, Clone)]
pub(crate) enum ApiReportSink {
    Directory(FsReportSink),
    Unconfigured,
}

impl ApiReportSink {
    pub(crate) fn from_settings(settings: &SamSettings) -> Self {
        match &settings.report_dir {
            Some(dir) => Self::Directory(FsReportSink::new(dir.clone())),
            None => Self::Unconfigured,
        }
    }
}

impl ReportSink for ApiReportSink {
    fn deliver(&self, document: &ReportDocument) -> Result<String, DeliveryError> {
        match self {
            Self::Directory(sink) => sink.deliver(document),
            Self::Unconfigured => Err(DeliveryError::Unavailable(
                "SAM_REPORT_DIR is not set".to_string(),
            )),
        }
    }
}

/// Lead destination chosen from `SAM_LEAD_ENDPOINT`.
#[derive(Debug, Clone)]
pub(crate) enum ApiLeadGateway {
    Http(HttpLeadGateway),
    Disabled,
}

impl ApiLeadGateway {
    pub(crate) fn from_settings(settings: &SamSettings) -> Self {
        match &settings.lead_endpoint {
            Some(endpoint) => Self::Http(HttpLeadGateway::new(endpoint.clone())),
            None => Self::Disabled,
        }
    }
}

impl LeadGateway for ApiLeadGateway {
    fn submit(&self, lead: &LeadSubmission) -> Result<(), LeadError> {
        match self {
            Self::Http(gateway) => gateway.submit(lead),
            Self::Disabled => Err(LeadError::NotConfigured),
        }
    }
}

pub(crate) type ApiService = HealthCheckService<ApiReportSink, ApiLeadGateway>;

pub(crate) fn build_service(settings: &SamSettings, config: SamConfig) -> ApiService {
    HealthCheckService::new(
        ScoringEngine::default(),
        ReportGenerator::new(settings.branding()),
        Arc::new(ApiReportSink::from_settings(settings)),
        Arc::new(ApiLeadGateway::from_settings(settings)),
        config,
    )
}

/// Builds calculator input from an optional CSV export plus command line
/// overrides. Overrides win over imported values.
pub(crate) fn load_input(
    csv: Option<&Path>,
    industry: Option<Industry>,
    overrides: &[(InputField, f64)],
) -> Result<CalculatorInput, ImportError> {
    let mut input = match csv {
        Some(path) => InputImporter::from_path(path)?,
        None => CalculatorInput::default(),
    };

    if let Some(industry) = industry {
        input.industry = industry;
    }
    input.set_many(overrides.iter().copied())?;
    Ok(input)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_industry(raw: &str) -> Result<Industry, String> {
    raw.parse::<Industry>().map_err(|err| err.to_string())
}

/// Parses `field=value`, e.g. `installedSoftware=1200`.
pub(crate) fn parse_assignment(raw: &str) -> Result<(InputField, f64), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = field.parse::<InputField>().map_err(|err| err.to_string())?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid value for {field}: {err}"))?;
    Ok((field, value))
}
