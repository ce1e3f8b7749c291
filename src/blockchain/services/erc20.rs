// src/blockchain/services/erc20.rs

use super::{check_status, hash_string, require};
use crate::blockchain::models::{
    TokenAllowanceResponse, TokenApprovalResponse, TokenBalanceResponse, TokenInfoResponse,
    TokenTransferResponse,
};
use crate::blockchain::provider::ActionProvider;
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{non_empty, or_default};
use tracing::error;

const DEFAULT_DECIMALS: u32 = 18;

fn require_token(token: &str) -> Result<(), AppFault> {
    require(token, FaultCode::InvalidTokenAddress, "Token address must be a non-empty string")
}

fn provider_fault(code: FaultCode, context: &str, e: anyhow::Error) -> AppFault {
    error!("{}: {:#}", context, e);
    AppFault::failed(code, format!("{:#}", e))
}

pub async fn get_balance(
    provider: &dyn ActionProvider,
    session: &Session,
    token: &str,
    owner: Option<&str>,
) -> Result<TokenBalanceResponse, AppFault> {
    require_token(token)?;
    let owner = non_empty(owner.map(str::to_string))
        .unwrap_or_else(|| session.wallet_address().to_string());

    let raw = provider
        .token_balance(session, token, &owner)
        .await
        .map_err(|e| provider_fault(FaultCode::TokenBalanceFailed, "Error getting token balance", e))?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::TokenBalanceFailed,
        "Failed to get token balance",
    )?;

    Ok(TokenBalanceResponse {
        address: non_empty(raw.owner_address).unwrap_or(owner),
        token_address: token.to_string(),
        token_name: non_empty(raw.token_name),
        balance: or_default(raw.balance, "0"),
    })
}

pub async fn transfer(
    provider: &dyn ActionProvider,
    session: &Session,
    token: &str,
    to: &str,
    amount: &str,
) -> Result<TokenTransferResponse, AppFault> {
    require_token(token)?;
    require(to, FaultCode::InvalidAddress, "Recipient address must be a non-empty string")?;

    let raw = provider
        .transfer_token(session, token, to, amount)
        .await
        .map_err(|e| provider_fault(FaultCode::TokenTransferFailed, "Error transferring token", e))?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::TokenTransferFailed,
        "Failed to transfer token",
    )?;

    Ok(TokenTransferResponse {
        tx_hash: hash_string(raw.tx_hash),
        from: session.wallet_address().to_string(),
        to: to.to_string(),
        token_address: token.to_string(),
        amount: amount.to_string(),
    })
}

pub async fn approve(
    provider: &dyn ActionProvider,
    session: &Session,
    token: &str,
    spender: &str,
    amount: &str,
) -> Result<TokenApprovalResponse, AppFault> {
    require_token(token)?;
    require(spender, FaultCode::InvalidAddress, "Spender address must be a non-empty string")?;

    let raw = provider
        .approve_token(session, token, spender, amount)
        .await
        .map_err(|e| provider_fault(FaultCode::TokenApprovalFailed, "Error approving token", e))?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::TokenApprovalFailed,
        "Failed to approve token",
    )?;

    Ok(TokenApprovalResponse {
        tx_hash: hash_string(raw.tx_hash),
        token_address: token.to_string(),
        spender: spender.to_string(),
        amount: amount.to_string(),
    })
}

pub async fn allowance(
    provider: &dyn ActionProvider,
    session: &Session,
    token: &str,
    owner: &str,
    spender: &str,
) -> Result<TokenAllowanceResponse, AppFault> {
    require_token(token)?;
    require(owner, FaultCode::InvalidAddress, "Owner address must be a non-empty string")?;
    require(spender, FaultCode::InvalidAddress, "Spender address must be a non-empty string")?;

    let raw = provider
        .token_allowance(session, token, owner, spender)
        .await
        .map_err(|e| provider_fault(FaultCode::TokenAllowanceFailed, "Error getting token allowance", e))?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::TokenAllowanceFailed,
        "Failed to get token allowance",
    )?;

    Ok(TokenAllowanceResponse {
        token_address: token.to_string(),
        owner_address: owner.to_string(),
        spender_address: spender.to_string(),
        allowance: or_default(raw.allowance, "0"),
    })
}

pub async fn info(
    provider: &dyn ActionProvider,
    session: &Session,
    token: &str,
) -> Result<TokenInfoResponse, AppFault> {
    require_token(token)?;

    let raw = provider
        .token_info(session, token)
        .await
        .map_err(|e| provider_fault(FaultCode::TokenInfoFailed, "Error getting token info", e))?;
    check_status(
        raw.status.as_deref(),
        raw.message.as_deref(),
        FaultCode::TokenInfoFailed,
        "Failed to get token info",
    )?;

    // Nested `info` wins over flat fields.
    let meta = raw.info.unwrap_or(raw.fields);
    Ok(TokenInfoResponse {
        address: token.to_string(),
        name: meta.name.unwrap_or_default(),
        symbol: meta.symbol.unwrap_or_default(),
        decimals: meta.decimals.unwrap_or(DEFAULT_DECIMALS),
        total_supply: or_default(meta.total_supply, "0"),
    })
}
