// src/blockchain/services/native.rs

use super::{hash_string, require};
use crate::blockchain::models::{BalanceResponse, TransactionResponse};
use crate::blockchain::provider::ActionProvider;
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{non_empty, or_default};
use tracing::error;

/// Native balance of `address`, or of the session wallet when none is given.
pub async fn get_balance(
    provider: &dyn ActionProvider,
    session: &Session,
    address: Option<&str>,
) -> Result<BalanceResponse, AppFault> {
    let target = non_empty(address.map(str::to_string))
        .unwrap_or_else(|| session.wallet_address().to_string());

    let raw = provider.get_balance(session, &target).await.map_err(|e| {
        error!("Error getting balance for {}: {:#}", target, e);
        AppFault::failed(FaultCode::GetBalanceFailed, "Failed to get balance")
    })?;

    Ok(BalanceResponse {
        address: target,
        balance: or_default(raw.balance, "0"),
    })
}

pub async fn transfer(
    provider: &dyn ActionProvider,
    session: &Session,
    to: &str,
    amount: &str,
) -> Result<TransactionResponse, AppFault> {
    require(to, FaultCode::InvalidAddress, "Recipient address is required")?;
    require(amount, FaultCode::InvalidAmount, "Amount is required")?;

    let raw = provider.transfer_native(session, to, amount).await.map_err(|e| {
        error!("Error transferring {} to {}: {:#}", amount, to, e);
        AppFault::failed(FaultCode::TransferFailed, "Failed to transfer tokens")
    })?;

    Ok(TransactionResponse {
        tx_hash: hash_string(raw.tx_hash),
        from: session.wallet_address().to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
    })
}
