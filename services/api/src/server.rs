use crate::cli::ServeArgs;
use crate::infra::Services;
use crate::routes::app_router;
use axum::http::{header, HeaderValue, Method};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hocs::config::{AppConfig, ServerConfig};
use hocs::error::AppError;
use hocs::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let services = Services::from_config(&config)?;
    let app_state = services.app_state(readiness_flag.clone(), prometheus_handle);

    let app = app_router(&services)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        session_ttl_secs = config.sessions.ttl.as_secs(),
        retry_attempts = services.retry.attempts(),
        "hocs savings service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if server.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
