use crate::cli::ServeArgs;
use crate::infra::{AppState, InProcessTrainer};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gymbuddy::config::AppConfig;
use gymbuddy::error::AppError;
use gymbuddy::scoring::source::CsvScanLog;
use gymbuddy::scoring::GymScoreService;
use gymbuddy::telemetry;
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

    let source = Arc::new(CsvScanLog::new(config.scan_log.path.clone()));
    let trainer = Arc::new(InProcessTrainer::default());
    let service = Arc::new(GymScoreService::new(source, trainer));

    let app = with_scoring_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, scan_log = %config.scan_log.path.display(), "gym consistency scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
