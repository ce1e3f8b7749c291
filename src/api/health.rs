// src/api/health.rs

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "wallet": state.dispatcher.client().wallet_address(),
        "tools": state.dispatcher.registry().len(),
    }))
}
