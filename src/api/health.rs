//! Liveness and service information endpoints

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use super::types::ACTION_DONE;

/// Public description of the running daemon
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub namespace: String,
}

/// Liveness probe; the verification client expects `ok`
pub async fn status() -> impl IntoResponse {
    (StatusCode::OK, ACTION_DONE)
}

pub async fn information(State(state): State<AppState>) -> impl IntoResponse {
    let info = ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        namespace: state.registry.namespace().to_string(),
    };

    (StatusCode::OK, Json(info))
}
