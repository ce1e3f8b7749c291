// src/blockchain/services/kuru.rs

use super::{require, require_positive};
use crate::blockchain::models::{PriceQuoteResponse, SwapResponse};
use crate::blockchain::provider::{ActionProvider, AmountType, PriceQuery, SwapOrder};
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{non_empty, or_default};
use serde_json::Value;
use tracing::{error, warn};

/// Address Kuru uses for the chain's native token.
pub const NATIVE_TOKEN: &str = "0x0000000000000000000000000000000000000000";
pub const DEFAULT_SLIPPAGE: f64 = 0.5;
const DEFAULT_DECIMALS: u32 = 18;
const DIRECTORY_PAGE: u32 = 20;

fn check_pair(token_in: &str, token_out: &str) -> Result<(), AppFault> {
    require(token_in, FaultCode::InvalidTokenAddress, "Input token address is required")?;
    require(token_out, FaultCode::InvalidTokenAddress, "Output token address is required")
}

/// Looks up the decimals of both tokens in one directory page. Unknown
/// tokens, and a failing directory, fall back to 18.
async fn resolve_decimals(
    provider: &dyn ActionProvider,
    token_in: &str,
    token_out: &str,
) -> (u32, u32) {
    let listings = match provider.search_tokens(None, DIRECTORY_PAGE).await {
        Ok(search) if search.success => search.data.and_then(|page| page.data).unwrap_or_default(),
        Ok(_) => {
            warn!("Token directory reported failure, assuming {} decimals", DEFAULT_DECIMALS);
            Vec::new()
        }
        Err(e) => {
            warn!("Token directory lookup failed, assuming {} decimals: {:#}", DEFAULT_DECIMALS, e);
            Vec::new()
        }
    };

    let decimals_of = |token: &str| {
        listings
            .iter()
            .find(|l| l.address.as_deref().is_some_and(|a| a.eq_ignore_ascii_case(token)))
            .and_then(|l| l.decimal)
            .unwrap_or(DEFAULT_DECIMALS)
    };

    (decimals_of(token_in), decimals_of(token_out))
}

fn route_hops(route: Option<Value>, token_in: &str, token_out: &str) -> Vec<String> {
    let hops: Vec<String> = match route {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|hop| match hop {
                Value::String(s) => Some(s),
                other => other.get("address").and_then(Value::as_str).map(str::to_string),
            })
            .collect(),
        Some(Value::String(s)) => s
            .split("->")
            .map(|hop| hop.trim().to_string())
            .filter(|hop| !hop.is_empty())
            .collect(),
        _ => Vec::new(),
    };

    if hops.is_empty() {
        vec![token_in.to_string(), token_out.to_string()]
    } else {
        hops
    }
}

pub async fn price(
    provider: &dyn ActionProvider,
    session: &Session,
    token_in: &str,
    token_out: &str,
    amount: f64,
    amount_type: Option<AmountType>,
) -> Result<PriceQuoteResponse, AppFault> {
    check_pair(token_in, token_out)?;
    require_positive(amount, FaultCode::InvalidAmount, "Amount must be greater than 0")?;

    let query = PriceQuery {
        token_in: token_in.to_string(),
        token_out: token_out.to_string(),
        amount,
        amount_type: amount_type.unwrap_or_default(),
    };
    let raw = provider.dex_price(session, &query).await.map_err(|e| {
        error!("Error fetching Kuru price: {:#}", e);
        AppFault::failed(FaultCode::PriceFetchFailed, format!("Failed to fetch price: {:#}", e))
    })?;

    Ok(PriceQuoteResponse {
        output: or_default(raw.output, "0"),
        price_impact: raw.price_impact.unwrap_or(0.0),
        route: route_hops(raw.route, token_in, token_out),
    })
}

pub async fn swap(
    provider: &dyn ActionProvider,
    session: &Session,
    token_in: &str,
    token_out: &str,
    amount: f64,
    slippage: Option<f64>,
) -> Result<SwapResponse, AppFault> {
    check_pair(token_in, token_out)?;
    require_positive(amount, FaultCode::InvalidAmount, "Amount must be greater than 0")?;

    let (in_decimals, out_decimals) = resolve_decimals(provider, token_in, token_out).await;
    let order = SwapOrder {
        token_in: token_in.to_string(),
        token_out: token_out.to_string(),
        amount,
        in_decimals,
        out_decimals,
        slippage: slippage.unwrap_or(DEFAULT_SLIPPAGE),
        approve_tokens: !token_in.eq_ignore_ascii_case(NATIVE_TOKEN),
    };

    let raw = provider.dex_swap(session, &order).await.map_err(|e| {
        error!("Error swapping on Kuru: {:#}", e);
        AppFault::failed(FaultCode::SwapFailed, format!("Failed to execute swap: {:#}", e))
    })?;

    Ok(SwapResponse {
        tx_hash: non_empty(raw.transaction_hash).unwrap_or_default(),
        token_in: token_in.to_string(),
        token_out: token_out.to_string(),
        amount_in: amount.to_string(),
        amount_out: or_default(raw.amount_out, "0"),
    })
}
