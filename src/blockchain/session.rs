// src/blockchain/session.rs

use crate::utils::with_hex_prefix;
use ethers::utils::to_checksum;
use ethers_signers::{LocalWallet, Signer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("wallet private key must not be empty")]
    EmptyCredential,
    #[error("RPC URL must not be empty")]
    EmptyRpcUrl,
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// The authenticated handle every operation runs under: the signing wallet
/// plus the RPC endpoint it talks to. Built once at startup and never mutated.
#[derive(Clone)]
pub struct Session {
    wallet: LocalWallet,
    address: String,
    rpc_url: String,
}

impl Session {
    /// Builds a session from a hex private key (the `0x` prefix is optional).
    pub fn new(private_key: &str, rpc_url: &str) -> Result<Self, SessionError> {
        if private_key.trim().is_empty() {
            return Err(SessionError::EmptyCredential);
        }
        if rpc_url.trim().is_empty() {
            return Err(SessionError::EmptyRpcUrl);
        }

        let normalized = with_hex_prefix(private_key);
        let wallet = LocalWallet::from_str(&normalized)
            .map_err(|e| SessionError::InvalidPrivateKey(e.to_string()))?;
        let address = to_checksum(&wallet.address(), None);

        Ok(Self {
            wallet,
            address,
            rpc_url: rpc_url.trim().to_string(),
        })
    }

    /// Checksummed address of the session wallet.
    pub fn wallet_address(&self) -> &str {
        &self.address
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn signer(&self) -> &LocalWallet {
        &self.wallet
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("rpc_url", &self.rpc_url)
            .finish_non_exhaustive()
    }
}
