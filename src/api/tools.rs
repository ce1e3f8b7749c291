// src/api/tools.rs

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};

pub async fn list_tools_handler(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Vec<Value> = state
        .dispatcher
        .registry()
        .descriptors()
        .map(|d| d.to_json())
        .collect();
    Json(json!({ "tools": tools }))
}
