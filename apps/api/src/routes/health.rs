use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version plus which conclusion strategy and webhook are wired in.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "motopack-api",
        "conclusion_strategy": state.pipeline.strategy_label(),
        "webhook_configured": state.pipeline.dispatcher_configured()
    }))
}
