//! # Review Request Routes
//!
//! `GET /api/review-requests` lists stored requests narrowed by optional
//! query parameters. `POST /api/review-requests` validates a submission,
//! assigns its id and creation date, and stores it as `Pending`.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use rdesk_core::{ReviewFilter, ReviewRequest};

use crate::error::AppError;
use crate::extractors::{extract_filter, extract_submission};
use crate::state::AppState;

/// Collection path.
pub const PATH: &str = "/api/review-requests";

// ── Handlers ────────────────────────────────────────────────────────

/// GET /api/review-requests: list review requests.
///
/// Every supplied parameter must match; `all` or an empty value imposes no
/// constraint. Results keep store order.
#[utoipa::path(
    get,
    path = "/api/review-requests",
    params(ReviewFilter),
    responses(
        (status = 200, description = "Matching review requests", body = Vec<ReviewRequest>),
        (status = 500, description = "Stored data could not be read", body = crate::error::ErrorBody),
    ),
    tag = "review-requests"
)]
pub async fn list_review_requests(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<ReviewRequest>>, AppError> {
    let filter = extract_filter(query.as_deref());
    let records = state.repository.list(&filter)?;
    tracing::debug!(matched = records.len(), ?filter, "listed review requests");
    Ok(Json(records))
}

/// POST /api/review-requests: submit a review request.
///
/// The body is read as JSON whatever its declared content type.
#[utoipa::path(
    post,
    path = "/api/review-requests",
    request_body = rdesk_core::NewReviewRequest,
    responses(
        (status = 201, description = "Review request stored", body = ReviewRequest),
        (status = 400, description = "Missing or invalid field", body = crate::error::ErrorBody),
        (status = 500, description = "Body unreadable or stored data unavailable", body = crate::error::ErrorBody),
    ),
    tag = "review-requests"
)]
pub async fn create_review_request(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ReviewRequest>), AppError> {
    let submission = extract_submission(body)?;
    let record = state
        .repository
        .create(submission, Utc::now().date_naive())?;
    tracing::info!(
        id = %record.id,
        client = %record.client_name,
        document_type = %record.document_type,
        priority = %record.priority,
        "review request submitted"
    );
    Ok((StatusCode::CREATED, Json(record)))
}

// ── Router ──────────────────────────────────────────────────────────

/// Review request routes.
pub fn router() -> Router<AppState> {
    Router::new().route(PATH, get(list_review_requests).post(create_review_request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::state::AppConfig;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router().with_state(AppState::with_repository(
            AppConfig::default(),
            InMemoryRepository::sample(),
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_without_query_returns_everything() {
        let resp = app()
            .oneshot(Request::builder().uri(PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn create_without_content_type_is_accepted() {
        let body = serde_json::json!({
            "clientName": "Fern Holdings",
            "documentTitle": "Investor Letter",
            "documentType": "Financial Promotion",
            "priority": "Low",
            "dueDate": "2030-01-31"
        });
        let resp = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(PATH)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let record = body_json(resp).await;
        assert_eq!(record["id"], "6");
        assert_eq!(record["status"], "Pending");
    }
}
