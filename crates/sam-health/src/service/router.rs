use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::error;

use super::HealthCheckService;
use crate::calculator::CalculatorInput;
use crate::error::AppError;
use crate::leads::{LeadCaptureOutcome, LeadGateway};
use crate::report::{ReportSink, PDF_CONTENT_TYPE};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportRequest {
    #[serde(default)]
    pub(crate) input: CalculatorInput,
    #[serde(default)]
    pub(crate) issued_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeadRequest {
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) input: CalculatorInput,
    #[serde(default)]
    pub(crate) issued_on: Option<NaiveDate>,
}

/// Router exposing scoring, report download, lead capture and content.
pub fn sam_router<S, G>(service: Arc<HealthCheckService<S, G>>) -> Router
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    Router::new()
        .route("/api/v1/sam/score", post(score_handler::<S, G>))
        .route("/api/v1/sam/report", post(report_handler::<S, G>))
        .route("/api/v1/sam/leads", post(lead_handler::<S, G>))
        .route("/api/v1/sam/config", get(config_handler::<S, G>))
        .with_state(service)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) async fn score_handler<S, G>(
    State(service): State<Arc<HealthCheckService<S, G>>>,
    Json(input): Json<CalculatorInput>,
) -> Response
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    (StatusCode::OK, Json(service.score(&input))).into_response()
}

pub(crate) async fn report_handler<S, G>(
    State(service): State<Arc<HealthCheckService<S, G>>>,
    Json(request): Json<ReportRequest>,
) -> Result<Response, AppError>
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    let issued_on = request.issued_on.unwrap_or_else(today);
    let document = service
        .report(&request.input, issued_on)
        .inspect_err(|err| error!(error = %err, "report generation failed"))?;

    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}

pub(crate) async fn lead_handler<S, G>(
    State(service): State<Arc<HealthCheckService<S, G>>>,
    Json(request): Json<LeadRequest>,
) -> Result<Json<LeadCaptureOutcome>, AppError>
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    let LeadRequest {
        email,
        input,
        issued_on,
    } = request;
    let issued_on = issued_on.unwrap_or_else(today);

    let outcome = tokio::task::spawn_blocking(move || {
        service.capture_lead(&email, &input, issued_on)
    })
    .await
    .inspect_err(|err| error!(error = %err, "lead capture task failed"))??;

    Ok(Json(outcome))
}

pub(crate) async fn config_handler<S, G>(
    State(service): State<Arc<HealthCheckService<S, G>>>,
) -> Response
where
    S: ReportSink + 'static,
    G: LeadGateway + 'static,
{
    (StatusCode::OK, Json(service.config())).into_response()
}
