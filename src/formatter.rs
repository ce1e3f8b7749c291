// src/formatter.rs

//! # Response Formatter
//!
//! Renders an [`OperationResult`] as the text returned to the client: a
//! title line followed by one `Label: value` line per field. Output is a
//! pure function of the result. Missing values render as a placeholder,
//! never as an empty slot.

use crate::blockchain::models::*;
use std::fmt::Write;

const MISSING: &str = "N/A";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

fn field(value: &str) -> &str {
    or_placeholder(value, MISSING)
}

pub fn format(result: &OperationResult) -> String {
    match result {
        OperationResult::Balance(r) => format_balance(r),
        OperationResult::Transfer(r) => format_transaction(r),
        OperationResult::TokenBalance(r) => format_token_balance(r),
        OperationResult::TokenTransfer(r) => format_token_transfer(r),
        OperationResult::TokenApproval(r) => format_token_approval(r),
        OperationResult::TokenAllowance(r) => format_token_allowance(r),
        OperationResult::TokenInfo(r) => format_token_info(r),
        OperationResult::Profile(r) => format_profile(r),
        OperationResult::ResolvedName(r) => format_resolved_name(r),
        OperationResult::PrimaryName(r) => format_primary_name(r),
        OperationResult::Names(r) => format_names(r),
        OperationResult::DomainPrice(r) => format_domain_price(r),
        OperationResult::DomainRegistration(r) => format_domain_registration(r),
        OperationResult::PriceQuote(r) => format_price_quote(r),
        OperationResult::Swap(r) => format_swap(r),
        OperationResult::Stake(r) => format_stake("Staking", r),
        OperationResult::Unstake(r) => format_stake("Unstaking", r),
        OperationResult::CurveCreation(r) => format_curve_creation(r),
        OperationResult::TokenSearch(r) => format_token_search(r),
    }
}

pub fn format_balance(r: &BalanceResponse) -> String {
    format!("Address: {}\nBalance: {} ETH", field(&r.address), or_placeholder(&r.balance, "0"))
}

pub fn format_transaction(r: &TransactionResponse) -> String {
    format!(
        "TRANSACTION DETAILS\nHash: {}\nFrom: {}\nTo: {}\nAmount: {} ETH\nStatus: Completed",
        or_placeholder(&r.tx_hash, "Pending"),
        field(&r.from),
        field(&r.to),
        field(&r.amount),
    )
}

fn format_token_balance(r: &TokenBalanceResponse) -> String {
    format!(
        "TOKEN BALANCE\nAddress: {}\nToken: {}\nToken Name: {}\nBalance: {}",
        field(&r.address),
        field(&r.token_address),
        or_placeholder(r.token_name.as_deref().unwrap_or_default(), "Unknown"),
        or_placeholder(&r.balance, "0"),
    )
}

fn format_token_transfer(r: &TokenTransferResponse) -> String {
    format!(
        "TOKEN TRANSFER\nHash: {}\nFrom: {}\nTo: {}\nToken: {}\nAmount: {}\nStatus: Completed",
        or_placeholder(&r.tx_hash, "Pending"),
        field(&r.from),
        field(&r.to),
        field(&r.token_address),
        field(&r.amount),
    )
}

fn format_token_approval(r: &TokenApprovalResponse) -> String {
    format!(
        "Successfully approved {} tokens for {}.\nTransaction hash: {}",
        field(&r.amount),
        field(&r.spender),
        or_placeholder(&r.tx_hash, "Pending"),
    )
}

fn format_token_allowance(r: &TokenAllowanceResponse) -> String {
    format!(
        "TOKEN ALLOWANCE\nToken: {}\nOwner: {}\nSpender: {}\nAllowance: {}",
        field(&r.token_address),
        field(&r.owner_address),
        field(&r.spender_address),
        or_placeholder(&r.allowance, "0"),
    )
}

fn format_token_info(r: &TokenInfoResponse) -> String {
    format!(
        "TOKEN INFO\nAddress: {}\nName: {}\nSymbol: {}\nDecimals: {}\nTotal Supply: {}",
        field(&r.address),
        or_placeholder(&r.name, "Unknown"),
        or_placeholder(&r.symbol, "Unknown"),
        r.decimals,
        or_placeholder(&r.total_supply, "0"),
    )
}

fn format_profile(r: &ProfileResponse) -> String {
    let mut out = format!("ENS PROFILE\nName: {}\nAddress: {}\nRecords:", field(&r.name), field(&r.address));
    if r.records.is_empty() {
        out.push_str(" None");
    }
    for (key, value) in &r.records {
        let _ = write!(out, "\n  {}: {}", key, field(value));
    }
    out
}

fn format_resolved_name(r: &ResolvedNameResponse) -> String {
    format!("ENS RESOLUTION\nName: {}\nAddress: {}", field(&r.name), field(&r.address))
}

fn format_primary_name(r: &PrimaryNameResponse) -> String {
    format!(
        "PRIMARY ENS NAME\nAddress: {}\nName: {}",
        field(&r.address),
        or_placeholder(&r.name, "Not set"),
    )
}

fn format_names(r: &NamesResponse) -> String {
    if r.names.is_empty() {
        return format!("No ENS names found for {}", field(&r.address));
    }
    format!("ENS Names for {}:\n{}", field(&r.address), r.names.join("\n"))
}

fn format_domain_price(r: &DomainPriceResponse) -> String {
    format!(
        "DOMAIN PRICE\nName: {}\nDuration: {} days\nPrice: {}",
        field(&r.name),
        r.duration,
        field(&r.price),
    )
}

fn format_domain_registration(r: &DomainRegistrationResponse) -> String {
    format!(
        "DOMAIN REGISTRATION\nDomain: {}\nHash: {}\nDuration: {} days",
        field(&r.name),
        or_placeholder(&r.tx_hash, "Pending"),
        r.duration,
    )
}

fn format_price_quote(r: &PriceQuoteResponse) -> String {
    let route = if r.route.is_empty() {
        "Not available".to_string()
    } else {
        r.route.join(" -> ")
    };
    format!(
        "Price Information:\nEstimated output: {}\nPrice impact: {}%\nRoute: {}",
        or_placeholder(&r.output, "0"),
        r.price_impact,
        route,
    )
}

fn format_swap(r: &SwapResponse) -> String {
    format!(
        "Swap transaction submitted\nTransaction Hash: {}\nInput: {} {}\nOutput: {} {}",
        or_placeholder(&r.tx_hash, "Pending"),
        field(&r.amount_in),
        field(&r.token_in),
        or_placeholder(&r.amount_out, "0"),
        field(&r.token_out),
    )
}

fn format_stake(action: &str, r: &StakeResponse) -> String {
    format!(
        "{} transaction submitted\nTransaction Hash: {}\nStatus: {}\n{}",
        action,
        or_placeholder(&r.tx_hash, "Pending"),
        or_placeholder(&r.status, "pending"),
        field(&r.message),
    )
}

fn format_curve_creation(r: &CurveCreationResponse) -> String {
    format!(
        "Meme token creation transaction submitted\nTransaction Hash: {}\nStatus: {}\nMessage: {}",
        or_placeholder(&r.tx_hash, "Pending"),
        or_placeholder(&r.status, "pending"),
        field(&r.message),
    )
}

fn format_token_search(r: &TokenSearchResponse) -> String {
    if r.tokens.is_empty() {
        return format!("No tokens found matching \"{}\"", r.query);
    }

    let mut out = format!("Found {} tokens matching \"{}\":\n", r.total, r.query);
    for (i, token) in r.tokens.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}. {} ({})\n   Address: {}\n   Decimals: {}",
            i + 1,
            or_placeholder(&token.name, "Unknown"),
            or_placeholder(&token.ticker, "?"),
            field(&token.address),
            token.decimals,
        );
        if let Some(website) = &token.website {
            let _ = write!(out, "\n   Website: {}", website);
        }
    }
    out
}
