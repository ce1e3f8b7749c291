// src/blockchain/services/shmonad.rs

use super::require_positive;
use crate::blockchain::models::StakeResponse;
use crate::blockchain::provider::{ActionProvider, RawStakeReceipt};
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{non_empty, or_default};
use tracing::error;

fn receipt(raw: RawStakeReceipt, default_message: &str) -> StakeResponse {
    StakeResponse {
        tx_hash: non_empty(raw.transaction_hash).unwrap_or_default(),
        status: or_default(raw.status, "pending"),
        message: or_default(raw.message, default_message),
    }
}

/// Stakes `amount` MON into shMonad.
pub async fn stake(
    provider: &dyn ActionProvider,
    session: &Session,
    amount: f64,
) -> Result<StakeResponse, AppFault> {
    require_positive(amount, FaultCode::InvalidAmount, "Amount must be greater than 0")?;

    let raw = provider.stake(session, amount).await.map_err(|e| {
        error!("Error staking {} MON: {:#}", amount, e);
        AppFault::failed(FaultCode::StakeFailed, format!("Failed to stake tokens: {:#}", e))
    })?;
    Ok(receipt(raw, "Staking transaction submitted"))
}

/// Redeems `shares` shMON.
pub async fn unstake(
    provider: &dyn ActionProvider,
    session: &Session,
    shares: f64,
) -> Result<StakeResponse, AppFault> {
    require_positive(shares, FaultCode::InvalidShares, "Shares must be greater than 0")?;

    let raw = provider.unstake(session, shares).await.map_err(|e| {
        error!("Error unstaking {} shares: {:#}", shares, e);
        AppFault::failed(FaultCode::UnstakeFailed, format!("Failed to unstake tokens: {:#}", e))
    })?;
    Ok(receipt(raw, "Unstaking transaction submitted"))
}
