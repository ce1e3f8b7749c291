// src/main.rs

use monad_mcp_server::{
    api,
    config::Config,
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};
use anyhow::Context;
use serde_json::Value;
use std::env;
use std::net::SocketAddr;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// --- HTTP Server Logic ---
async fn run_http_server(state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 HTTP Server listening on {}", addr);
    axum::serve(listener, api::router(state)).await?;
    Ok(())
}

// --- MCP Server Logic ---

/// Turns one stdin line into the response to write back, if any.
async fn answer_line(line: &str, state: &AppState) -> Option<Response> {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_mcp_request(request, state.clone()).await,
        Err(parse_error) => {
            warn!("Rejecting unparsable line: {}", parse_error);
            Some(Response::error(
                Value::Null,
                error_codes::PARSE_ERROR,
                format!("Parse error: {}", parse_error),
            ))
        }
    }
}

async fn write_response(stdout: &mut Stdout, response: &Response) -> io::Result<()> {
    let mut frame = serde_json::to_vec(response)?;
    frame.push(b'\n');
    stdout.write_all(&frame).await?;
    stdout.flush().await
}

/// Line-delimited JSON-RPC over stdin/stdout, one request at a time.
async fn run_mcp_server(state: AppState) {
    info!("🚀 Starting MCP server on stdin/stdout...");

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("EOF received, shutting down MCP server");
                break;
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("<- {}", line);

        let Some(response) = answer_line(line, &state).await else {
            continue;
        };
        if let Err(e) = write_response(&mut stdout, &response).await {
            error!("Failed to write response: {}", e);
            break;
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the MCP stream.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monad_mcp_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("❌ Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let mcp_mode = config.mcp_mode || env::args().any(|arg| arg == "--mcp");

    let app_state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            error!("❌ Failed to initialize server: {:#}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Serving {} tools for wallet {}",
        app_state.dispatcher.registry().len(),
        app_state.dispatcher.client().wallet_address()
    );

    if mcp_mode {
        run_mcp_server(app_state).await;
    } else if let Err(e) = run_http_server(app_state).await {
        error!("❌ HTTP server failed: {:#}", e);
        std::process::exit(1);
    }
}
