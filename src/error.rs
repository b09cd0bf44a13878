//! HTTP error mapping.
//!
//! Domain errors carry a grepable `E_*` code; `ApiError` turns them into a
//! JSON body `{"error": code, "message": text}` with a matching status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use layout::LayoutError;

use crate::services::store::StoreError;

/// Grepable error code for structured error responses.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Json(_) => "E_BAD_JSON",
            Self::NotAnArray => "E_NOT_AN_ARRAY",
            Self::Malformed { .. } => "E_MALFORMED_ELEMENT",
            Self::Invalid { .. } => "E_INVALID_ELEMENT",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
        }
    }
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Layout(LayoutError::Json(_)) => StatusCode::BAD_REQUEST,
            Self::Layout(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Layout(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.error_code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
