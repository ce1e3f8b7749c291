// src/blockchain/transactions.rs

use crate::blockchain::nonce_manager::NonceManager;
use crate::blockchain::rpc::{parse_quantity, rpc_call};
use crate::blockchain::session::Session;
use anyhow::{anyhow, bail, Context, Result};
use ethers_core::types::{TransactionRequest, U256};
use ethers_signers::Signer;
use reqwest::Client;
use serde_json::json;
use tracing::info;

fn narrow_chain_id(chain_id: U256) -> Result<u64> {
    if chain_id > U256::from(u64::MAX) {
        bail!("chain id {} does not fit in 64 bits", chain_id);
    }
    Ok(chain_id.as_u64())
}

/// Fills in nonce, chain id, gas and gas price, signs with the session
/// wallet and broadcasts. Returns the transaction hash.
pub async fn send_transaction(
    client: &Client,
    session: &Session,
    tx_request: TransactionRequest,
    nonce_manager: &NonceManager,
) -> Result<String> {
    let rpc_url = session.rpc_url();
    let wallet = session.signer();
    let from_address = wallet.address();

    let nonce = nonce_manager.get_next_nonce(client, from_address, rpc_url).await?;

    let chain_id = parse_quantity(&rpc_call(client, rpc_url, "eth_chainId", json!([])).await?)
        .context("Failed to get chain_id from RPC")
        .and_then(narrow_chain_id)?;

    let mut tx = tx_request
        .from(from_address)
        .nonce(nonce)
        .chain_id(chain_id);

    if tx.gas.is_none() {
        let call_obj = serde_json::to_value(&tx)?;
        let estimate = rpc_call(client, rpc_url, "eth_estimateGas", json!([call_obj])).await?;
        tx = tx.gas(parse_quantity(&estimate).context("Failed to get gas estimate")?);
    }

    // Legacy pricing; Monad accepts type-0 transactions.
    if tx.gas_price.is_none() {
        let gas_price = rpc_call(client, rpc_url, "eth_gasPrice", json!([])).await?;
        tx = tx.gas_price(parse_quantity(&gas_price).context("Failed to get gasPrice")?);
    }

    let signature = wallet.sign_transaction(&tx.clone().into()).await?;
    let raw_tx = tx.rlp_signed(&signature);

    let result = rpc_call(
        client,
        rpc_url,
        "eth_sendRawTransaction",
        json!([format!("0x{}", hex::encode(raw_tx))]),
    )
    .await?;
    let tx_hash = result
        .as_str()
        .ok_or_else(|| anyhow!("eth_sendRawTransaction returned no hash"))?
        .to_string();

    info!("Broadcast transaction {} from {:?} with nonce {}", tx_hash, from_address, nonce);
    Ok(tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_must_fit_u64() {
        assert_eq!(narrow_chain_id(U256::from(10143u64)).unwrap(), 10143);
        assert_eq!(narrow_chain_id(U256::from(u64::MAX)).unwrap(), u64::MAX);
        assert!(narrow_chain_id(U256::from(u64::MAX) + U256::one()).is_err());
    }
}
