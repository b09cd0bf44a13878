//! Persistence client for the layout store.
//!
//! With the `web` feature, real HTTP calls go through `gloo-net`. The URL,
//! status and decoding helpers are plain functions so they test natively.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as [`ApiError`]; the browser handle turns it into
//! a console error plus a blocking alert. There is no retry.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde_json::Value;

use crate::doc::Layout;
#[cfg(feature = "web")]
use crate::doc::PlacedElement;
use layout::LayoutError;

pub const SAVE_LAYOUT_PATH: &str = "/api/save-layout";
pub const GET_LAYOUT_PATH: &str = "/api/get-layout";

/// Shown to the user when a save fails.
pub const SAVE_FAILED_ALERT: &str = "Failed to save layout. Make sure the server is running.";

/// Shown to the user when a load fails.
pub const LOAD_FAILED_ALERT: &str =
    "Failed to load layout. Make sure the server is running and a layout has been saved.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid layout from server: {0}")]
    Decode(#[from] LayoutError),
}

#[cfg(feature = "web")]
impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Body of a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveReceipt {
    pub message: String,
}

/// Join a store base URL and an API path. An empty base means same origin.
#[must_use]
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

/// Map a response status to an error unless it is a 2xx.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for any non-success status.
pub fn check_status(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(ApiError::Status(status)) }
}

/// Validate a loaded body through the shared layout boundary.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not a valid layout.
pub fn decode_layout(body: Value) -> Result<Layout, ApiError> {
    Ok(Layout::from_value(body)?)
}

/// POST the elements to the store, replacing whatever it holds.
///
/// # Errors
///
/// Returns an error on transport failure or a non-success status.
#[cfg(feature = "web")]
pub async fn save_layout(base: &str, elements: &[PlacedElement]) -> Result<SaveReceipt, ApiError> {
    let resp = gloo_net::http::Request::post(&endpoint(base, SAVE_LAYOUT_PATH))
        .json(&elements)?
        .send()
        .await?;
    check_status(resp.status())?;
    Ok(resp.json::<SaveReceipt>().await?)
}

/// GET the stored layout.
///
/// # Errors
///
/// Returns an error on transport failure, a non-success status, or a body
/// that fails layout validation.
#[cfg(feature = "web")]
pub async fn load_layout(base: &str) -> Result<Layout, ApiError> {
    let resp = gloo_net::http::Request::get(&endpoint(base, GET_LAYOUT_PATH))
        .send()
        .await?;
    check_status(resp.status())?;
    let body: Value = resp.json().await?;
    decode_layout(body)
}
