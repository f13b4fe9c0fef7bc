use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version, live session count and
/// the number of off-screen export copies still attached.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    Ok(Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "sessions": state.sessions.len()?,
        "offscreen_copies": state.exporter.surface.attached()
    })))
}
