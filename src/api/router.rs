use std::time::Duration;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::infrastructure::observability::create_metrics_router;

use super::health;
use super::middleware::{
    logging_middleware, metrics_middleware, rate_limit_middleware, timeout_middleware,
};
use super::state::AppState;
use super::v1;

/// Router settings that are not services
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    pub metrics_path: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            metrics_path: "/metrics".to_string(),
        }
    }
}

/// Create the full router with application state
///
/// Rate limiting covers `/v1` only, so probes and scrapes are never throttled.
pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let mut api = v1::create_v1_router();
    if let Some(limiter) = state.rate_limiter.clone() {
        api = api.layer(from_fn_with_state(limiter, rate_limit_middleware));
    }

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .nest("/v1", api);

    if let Some(metrics) = state.metrics.clone() {
        router = router.merge(create_metrics_router(metrics, &options.metrics_path));
    }

    router
        .with_state(state)
        .layer(from_fn_with_state(options.request_timeout, timeout_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}
