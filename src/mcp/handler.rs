// src/mcp/handler.rs

//! # MCP Handler Module
//!
//! Implements the Model Context Protocol surface of the Monad server:
//!
//! - `initialize` - server info and capabilities
//! - `tools/list` - every registered tool with its input schema
//! - `tools/call` - runs a tool through the [`Dispatcher`](crate::tools::Dispatcher)
//! - `ping`
//!
//! A tool name may also be used directly as the method; such requests are
//! rewritten into `tools/call`. Notifications get no response.

use super::normalize;
use super::protocol::{error_codes, Request, Response, ToolCallParams, PROTOCOL_VERSION};
use crate::AppState;
use futures::FutureExt;
use serde_json::{json, Value};
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info};

pub const SERVER_NAME: &str = "monad-mcp";

/// Handles one MCP request. Returns `None` for notifications.
pub async fn handle_mcp_request(req: Request, state: AppState) -> Option<Response> {
    info!("Handling MCP request for method: {}", req.method);

    if req.is_notification() {
        debug!("Ignoring notification {}", req.method);
        return None;
    }

    let id = req.id.clone();
    let response = AssertUnwindSafe(route(req, &state))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| {
            error!("Unexpected error while handling request {}", id);
            normalize::internal_error(id)
        });

    Some(response)
}

async fn route(req: Request, state: &AppState) -> Response {
    match req.method.as_str() {
        "initialize" => handle_initialize(&req, state),
        "tools/list" => handle_tools_list(&req, state),
        "tools/call" => handle_tool_call(req, state).await,
        "ping" => Response::success(req.id, json!({})),
        method if state.dispatcher.registry().resolve(method).is_some() => {
            let wrapped = Request::new(
                req.id,
                "tools/call",
                Some(json!({
                    "name": method,
                    "arguments": req.params.unwrap_or_else(|| json!({}))
                })),
            );
            handle_tool_call(wrapped, state).await
        }
        _ => Response::error(
            req.id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    }
}

fn handle_initialize(req: &Request, state: &AppState) -> Response {
    let instructions = format!(
        "Monad blockchain MCP server. Operations run as wallet {}: native and ERC20 transfers, \
         name service lookups and registration, Kuru swaps, shMonad staking, nad.fun token \
         creation and token search.",
        state.dispatcher.client().wallet_address()
    );

    Response::success(
        req.id.clone(),
        json!({
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "instructions": instructions
        }),
    )
}

fn handle_tools_list(req: &Request, state: &AppState) -> Response {
    let tools: Vec<Value> = state
        .dispatcher
        .registry()
        .descriptors()
        .map(|d| d.to_json())
        .collect();
    Response::success(req.id.clone(), json!({ "tools": tools }))
}

async fn handle_tool_call(req: Request, state: &AppState) -> Response {
    let params = match req.params {
        Some(p) => p,
        None => {
            return Response::error(req.id, error_codes::INVALID_PARAMS, "Missing params for tools/call");
        }
    };

    let call: ToolCallParams = match serde_json::from_value(params) {
        Ok(call) => call,
        Err(e) => {
            return Response::error(
                req.id,
                error_codes::INVALID_PARAMS,
                format!("Invalid params for tools/call: {}", e),
            );
        }
    };

    info!("Calling tool {}", call.name);
    let outcome = state.dispatcher.invoke(&call.name, call.arguments).await;
    normalize::tool_call_response(req.id, outcome)
}
