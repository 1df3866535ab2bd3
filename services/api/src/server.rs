use crate::cli::ServeArgs;
use crate::infra::{load_voucher_table, AppState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dealscope::config::AppConfig;
use dealscope::error::AppError;
use dealscope::telemetry;
use dealscope::underwriting::{AssumptionsUpdate, GlobalAssumptions};
use std::sync::atomic::Ordering;
use std::sync::{Arc, RwLock};
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

    let mut assumptions = GlobalAssumptions::standard();
    if let Some(path) = &config.underwriting.voucher_table_path {
        let table = load_voucher_table(path)?;
        info!(path = %path.display(), zips = table.len(), "loaded voucher payment standards");
        assumptions.apply(AssumptionsUpdate {
            voucher_rents: Some(table),
            ..AssumptionsUpdate::default()
        });
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        assumptions: Arc::new(RwLock::new(assumptions)),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "deal underwriting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
