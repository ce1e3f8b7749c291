// src/blockchain/nonce_manager.rs

use crate::blockchain::rpc::{parse_quantity, rpc_call};
use dashmap::DashMap;
use ethers_core::types::{Address, U256};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Hands out sequential nonces per sender so concurrent submissions from
/// the session wallet never collide.
#[derive(Debug, Clone, Default)]
pub struct NonceManager {
    nonces: Arc<DashMap<Address, Arc<Mutex<NonceState>>>>,
}

#[derive(Debug)]
struct NonceState {
    next_nonce: Option<U256>,
}

impl NonceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next nonce for `address`. The first call per address asks the node
    /// (`eth_getTransactionCount`, pending); later calls count up locally.
    pub async fn get_next_nonce(&self, client: &Client, address: Address, rpc_url: &str) -> anyhow::Result<U256> {
        let address_nonce_lock = self
            .nonces
            .entry(address)
            .or_insert_with(|| Arc::new(Mutex::new(NonceState { next_nonce: None })))
            .clone();

        let mut state = address_nonce_lock.lock().await;

        let nonce_to_use = match state.next_nonce {
            Some(nonce) => nonce,
            None => {
                let count = rpc_call(
                    client,
                    rpc_url,
                    "eth_getTransactionCount",
                    json!([format!("{:?}", address), "pending"]),
                )
                .await?;
                parse_quantity(&count)?
            }
        };

        state.next_nonce = Some(nonce_to_use + U256::one());
        Ok(nonce_to_use)
    }

    /// Drops the cached nonce so the next call re-reads it from the node.
    pub fn reset(&self, address: &Address) {
        self.nonces.remove(address);
    }
}
