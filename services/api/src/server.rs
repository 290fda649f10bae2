use crate::cli::ServeArgs;
use crate::infra::{build_service, AppState};
use crate::routes::with_sam_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sam_health::config::AppConfig;
use sam_health::content::SamConfig;
use sam_health::error::AppError;
use sam_health::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(build_service(&config.sam, SamConfig::default()));

    let content = config.sam.content.clone();
    info!(source = %content.describe(), "loading calculator content");
    let loader = service.clone();
    tokio::task::spawn_blocking(move || loader.reload_config(content.provider().as_ref()))
        .await?;

    let app = with_sam_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        brand = %config.sam.brand,
        "sam health check ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
