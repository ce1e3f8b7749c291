// src/api/mod.rs

//! # API Module
//!
//! HTTP transport for the Monad MCP server.
//!
//! ## Available Endpoints
//! - `GET /api/health` - liveness check
//! - `GET /api/tools` - registered tools and their input schemas
//! - `POST /api/rpc` - JSON-RPC endpoint, same methods as the stdio transport

pub mod health;
pub mod rpc;
pub mod tools;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/tools", get(tools::list_tools_handler))
        .route("/rpc", post(rpc::rpc_handler));

    Router::new()
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
