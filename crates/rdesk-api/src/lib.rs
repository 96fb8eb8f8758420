//! # rdesk-api — Axum API Service for Review Desk
//!
//! Serves the review request collection over HTTP on top of
//! [`rdesk_core`].
//!
//! ## API Surface
//!
//! | Path                    | Module                        | Purpose              |
//! |-------------------------|-------------------------------|----------------------|
//! | `/api/review-requests`  | [`routes::review_requests`]   | List and submit      |
//! | `/health/liveness`      | this module                   | Process is up        |
//! | `/health/readiness`     | this module                   | Data is readable     |
//! | `/metrics`              | [`middleware::metrics`]       | Request counters     |
//! | `/openapi.json`         | [`openapi`]                   | OpenAPI document     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes are mounted outside the metrics layer so that probe
/// traffic does not skew the counters.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::review_requests::router())
        .merge(middleware::metrics::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state.clone());

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .with_state(state);

    Router::new().merge(health).merge(api)
}

/// Liveness probe. Always `200 ok` while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. `503` while the stored data cannot be read.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.repository.is_available() {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "dataset unavailable")
    }
}
