//! # API Route Modules
//!
//! - `review_requests`: listing with filters and search, and submission
//!   intake, under `/api/review-requests`.

pub mod review_requests;
