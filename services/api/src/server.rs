use crate::cli::ServeArgs;
use crate::infra::{file_scan_service, AppState};
use crate::routes::with_scan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nutriscan::config::AppConfig;
use nutriscan::error::AppError;
use nutriscan::telemetry;
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

    let scan_service = Arc::new(file_scan_service(&config.scans));

    let app = with_scan_routes(scan_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        log_path = %config.scans.log_path.display(),
        ocr_lang = %config.scans.ocr_lang,
        "label scan service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
