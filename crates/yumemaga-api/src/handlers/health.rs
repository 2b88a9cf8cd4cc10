//! Health check handler.

use axum::{extract::State, Json};

use yumemaga_models::Envelope;

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/health - Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<Envelope<HealthResponse>> {
    Json(Envelope::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.config.uptime_seconds(),
    }))
}
