//! Typed HTTP client for the Review Desk API.
//!
//! | Method | Path                   | Operation          |
//! |--------|------------------------|--------------------|
//! | GET    | `/api/review-requests` | List with filters  |
//! | POST   | `/api/review-requests` | Submit a request   |

use std::time::Duration;

use rdesk_core::{NewReviewRequest, ReviewFilter, ReviewRequest};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::ClientConfig;

/// Collection path relative to the API base URL.
const COLLECTION: &str = "api/review-requests";

/// Message used when an error response carries no readable `error` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors from API calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        /// The body's `error` field, or [`UNKNOWN_ERROR`].
        message: String,
    },

    /// A success response did not hold the expected JSON.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the review request collection.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    collection: Url,
}

impl ReviewClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let collection = config.api_url.join(COLLECTION)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client setup".into(),
                source: e,
            })?;
        Ok(Self { http, collection })
    }

    /// Fetch review requests matching `filter`.
    ///
    /// Calls `GET {api_url}/api/review-requests?{filter}`.
    pub async fn list(&self, filter: &ReviewFilter) -> Result<Vec<ReviewRequest>, ClientError> {
        let endpoint = "GET /api/review-requests";
        tracing::debug!(?filter, "fetching review requests");

        let resp = self
            .http
            .get(self.collection.clone())
            .query(filter)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let resp = check_status(endpoint, resp).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Submit a new review request and return the stored record.
    ///
    /// Calls `POST {api_url}/api/review-requests`.
    pub async fn submit(&self, request: &NewReviewRequest) -> Result<ReviewRequest, ClientError> {
        let endpoint = "POST /api/review-requests";

        let resp = self
            .http
            .post(self.collection.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let resp = check_status(endpoint, resp).await?;
        resp.json().await.map_err(|e| ClientError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

async fn check_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ClientError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|r| r.error)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    Err(ClientError::Api {
        endpoint: endpoint.into(),
        status,
        message,
    })
}
