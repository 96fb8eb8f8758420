//! # OpenAPI Document
//!
//! Generated with `utoipa` from the handler annotations and served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::middleware::metrics::MetricsSnapshot;
use rdesk_core::{DocumentType, NewReviewRequest, Priority, ReviewRequest, Status};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Review Desk API",
        version = "0.1.0",
        description = "Intake and listing of document review requests."
    ),
    paths(
        crate::routes::review_requests::list_review_requests,
        crate::routes::review_requests::create_review_request,
        crate::middleware::metrics::metrics_json,
    ),
    components(schemas(
        ReviewRequest,
        NewReviewRequest,
        DocumentType,
        Priority,
        Status,
        ErrorBody,
        MetricsSnapshot,
    )),
    tags(
        (name = "review-requests", description = "Review request intake and listing"),
        (name = "operations", description = "Service counters"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Router serving `/openapi.json`.
pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/openapi.json", get(openapi_json))
}
