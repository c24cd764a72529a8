use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository};
use crate::routes::with_funnel_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use candidacy_funnel::config::AppConfig;
use candidacy_funnel::error::AppError;
use candidacy_funnel::funnel::leads::FunnelState;
use candidacy_funnel::funnel::quiz::JsonFileStore;
use candidacy_funnel::telemetry;
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

    let sessions = Arc::new(JsonFileStore::with_namespace(
        config.storage.session_dir.clone(),
        config.storage.namespace.clone(),
    ));
    let leads = Arc::new(InMemoryLeadRepository::default());
    let funnel = Arc::new(FunnelState::new(sessions, leads));

    let app = with_funnel_routes(funnel)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidacy funnel ready");

    axum::serve(listener, app).await?;
    Ok(())
}
