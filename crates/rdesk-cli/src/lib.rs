//! # rdesk-cli — Review Desk Command Line
//!
//! Talks to the Review Desk API over HTTP.
//!
//! - [`list`]: `rdesk list`, one-shot filtered listing.
//! - [`submit`]: `rdesk submit`, new review request intake.
//! - [`browse`]: `rdesk browse`, interactive search, sort and status edits.
//! - [`client`]: typed `reqwest` client for the API.
//! - [`table`]: text rendering of a listing.

pub mod browse;
pub mod client;
pub mod config;
pub mod list;
pub mod submit;
pub mod table;
