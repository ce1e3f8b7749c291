// src/lib.rs

use std::sync::Arc;

use anyhow::{Context, Result};
use secrecy::ExposeSecret;

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod formatter;
pub mod mcp;
pub mod tools;
pub mod utils;

use blockchain::{ActionProvider, EvmActionProvider, MonadClient};
use tools::{Dispatcher, ToolRegistry};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::Config>,
    /// Tool registry plus the client every tool runs against
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: config::Config, dispatcher: Dispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Wires the standard tool set to the given provider.
    pub fn with_provider(config: config::Config, provider: Arc<dyn ActionProvider>) -> Result<Self> {
        let client = MonadClient::connect(
            config.wallet_private_key.expose_secret(),
            &config.monad_rpc_url,
            provider,
        )
        .context("Failed to set up wallet session")?;
        let registry = ToolRegistry::standard().context("Failed to build tool registry")?;
        Ok(Self::new(config, Dispatcher::new(registry, client)))
    }

    /// Production wiring: EVM JSON-RPC plus the configured external services.
    pub fn from_config(config: config::Config) -> Result<Self> {
        let provider = Arc::new(EvmActionProvider::from_config(&config));
        Self::with_provider(config, provider)
    }
}
