// src/config.rs

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::env;

pub const DEFAULT_RPC_URL: &str = "https://rpc.monad.xyz/";
pub const DEFAULT_TOKEN_API_URL: &str = "https://api.kuru.io";

// All configuration, loaded once at startup from the environment / .env file.
#[derive(Debug)]
pub struct Config {
    // Server settings
    pub port: u16,
    pub mcp_mode: bool,

    /// Hex private key of the wallet every operation runs as.
    pub wallet_private_key: SecretString,
    /// EVM JSON-RPC endpoint of the Monad network.
    pub monad_rpc_url: String,

    // External services
    /// Agent-kit bridge for name service, Kuru, shMonad and nad.fun actions.
    pub agent_kit_url: Option<String>,
    /// Base URL of the Kuru token directory.
    pub token_api_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let wallet_private_key = lookup("WALLET_PRIVATE_KEY")
            .context("WALLET_PRIVATE_KEY must be set to the hex private key of the server wallet")?;

        let config = Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            mcp_mode: lookup("MCP_MODE").is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
            wallet_private_key: SecretString::new(wallet_private_key),
            monad_rpc_url: lookup("MONAD_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            agent_kit_url: lookup("AGENT_KIT_URL").filter(|v| !v.trim().is_empty()),
            token_api_url: lookup("TOKEN_API_URL").unwrap_or_else(|| DEFAULT_TOKEN_API_URL.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty credentials and endpoints.
    pub fn validate(&self) -> Result<()> {
        if self.wallet_private_key.expose_secret().trim().is_empty() {
            bail!("WALLET_PRIVATE_KEY must not be empty");
        }
        if self.monad_rpc_url.trim().is_empty() {
            bail!("MONAD_RPC_URL must not be empty");
        }
        if self.token_api_url.trim().is_empty() {
            bail!("TOKEN_API_URL must not be empty");
        }
        Ok(())
    }
}
