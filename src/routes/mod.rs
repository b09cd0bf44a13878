//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the two layout endpoints plus a health probe under one Axum router.
//! When a static directory is configured, the editor bundle is served from it
//! as the fallback so the page and the API share an origin.

pub mod layouts;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::services::store::StoreStats;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/save-layout", post(layouts::save_layout))
        .route("/api/get-layout", get(layouts::get_layout))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    match &config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router,
    }
}

#[derive(serde::Serialize)]
struct Health {
    status: &'static str,
    #[serde(flatten)]
    stats: StoreStats,
}

async fn healthz(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(Health { status: "ok", stats }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
