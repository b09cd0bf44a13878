//! Layout save/load routes.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use layout::Layout;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;

pub const SAVED_MESSAGE: &str = "Layout saved successfully.";

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub message: String,
}

/// `POST /api/save-layout` — replace the stored layout with the request body.
///
/// The body is parsed regardless of `Content-Type`. A rejected body leaves
/// the stored layout unchanged.
pub async fn save_layout(State(state): State<AppState>, body: Bytes) -> Result<Json<SaveResponse>, ApiError> {
    let layout = Layout::from_json_slice(&body).map_err(|e| {
        warn!(error = %e, code = e.error_code(), "rejected layout");
        ApiError::from(e)
    })?;

    let elements = layout.len();
    let revision = state.store.save(layout).await?;
    info!(revision, elements, "layout saved");

    Ok(Json(SaveResponse { message: SAVED_MESSAGE.to_owned() }))
}

/// `GET /api/get-layout` — the stored layout, `[]` if nothing was saved.
pub async fn get_layout(State(state): State<AppState>) -> Result<Json<Layout>, ApiError> {
    let layout = state.store.load().await?;
    Ok(Json(layout))
}

#[cfg(test)]
#[path = "layouts_test.rs"]
mod tests;
