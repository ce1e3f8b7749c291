// src/blockchain/provider.rs

//! # Action Provider
//!
//! The boundary between the gateway and whatever actually talks to the chain.
//! Every operation is one async method returning a *raw* result: loosely
//! typed, every field optional, shaped however the backend likes. The
//! adapters in [`crate::blockchain::services`] are responsible for turning
//! those into the typed results in [`crate::blockchain::models`].
//!
//! Raw types deserialize leniently so the same structs can be filled from a
//! JSON bridge payload or built in-process: amounts accept numbers or
//! strings, transaction hashes accept a bare string or a receipt object.

use crate::blockchain::session::Session;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn get_balance(&self, session: &Session, address: &str) -> Result<RawBalance>;

    async fn transfer_native(&self, session: &Session, to: &str, amount: &str) -> Result<RawTransfer>;

    async fn token_balance(&self, session: &Session, token: &str, owner: &str) -> Result<RawTokenBalance>;

    async fn transfer_token(
        &self,
        session: &Session,
        token: &str,
        to: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer>;

    async fn approve_token(
        &self,
        session: &Session,
        token: &str,
        spender: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer>;

    async fn token_allowance(
        &self,
        session: &Session,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<RawTokenAllowance>;

    async fn token_info(&self, session: &Session, token: &str) -> Result<RawTokenInfo>;

    async fn ens_profile(&self, session: &Session, name: &str) -> Result<RawEnsProfile>;

    async fn ens_resolve(&self, session: &Session, name: &str) -> Result<RawEnsResolution>;

    async fn ens_primary_name(&self, session: &Session, address: &str) -> Result<RawEnsPrimaryName>;

    async fn ens_names(&self, session: &Session, address: &str) -> Result<RawEnsNames>;

    async fn ens_domain_price(&self, session: &Session, name: &str, duration: u32) -> Result<RawDomainPrice>;

    async fn ens_register(
        &self,
        session: &Session,
        name: &str,
        tld: &str,
        duration: u32,
    ) -> Result<RawDomainRegistration>;

    async fn dex_price(&self, session: &Session, query: &PriceQuery) -> Result<RawPriceQuote>;

    async fn dex_swap(&self, session: &Session, order: &SwapOrder) -> Result<RawSwap>;

    async fn stake(&self, session: &Session, amount: f64) -> Result<RawStakeReceipt>;

    async fn unstake(&self, session: &Session, shares: f64) -> Result<RawStakeReceipt>;

    async fn create_curve(&self, session: &Session, launch: &CurveLaunch) -> Result<RawCurveCreation>;

    /// Queries the token directory. `name` narrows the search, `None` lists the top entries.
    async fn search_tokens(&self, name: Option<&str>, limit: u32) -> Result<RawTokenSearch>;

    async fn fetch_image(&self, url: &str) -> Result<RemoteImage>;
}

// --- Lenient field decoding ---

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A transaction hash as backends report it: either the hash itself or a
/// receipt-like object carrying `transactionHash`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TxHash {
    Plain(String),
    Receipt {
        #[serde(rename = "transactionHash", default)]
        transaction_hash: Option<String>,
    },
}

impl TxHash {
    pub fn into_hash(self) -> Option<String> {
        match self {
            TxHash::Plain(hash) => Some(hash),
            TxHash::Receipt { transaction_hash } => transaction_hash,
        }
    }
}

// --- Raw results ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBalance {
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransfer {
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenBalance {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub balance: Option<String>,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub owner_address: Option<String>,
}

/// Result of a token transfer or approval.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenTransfer {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenAllowance {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub allowance: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub decimals: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_supply: Option<String>,
}

/// Token metadata, either flat or nested under `info`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub info: Option<RawTokenMetadata>,
    #[serde(flatten)]
    pub fields: RawTokenMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnsRecord {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub records: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnsProfile {
    #[serde(default)]
    pub profile: Option<RawEnsRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnsResolution {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnsPrimaryName {
    #[serde(default)]
    pub primary_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnsNames {
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDomainPrice {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDomainRegistration {
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceQuote {
    #[serde(default, deserialize_with = "lenient_string")]
    pub output: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_impact: Option<f64>,
    /// A list of hop addresses or a preformatted string.
    #[serde(default)]
    pub route: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSwap {
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount_out: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStakeReceipt {
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCurveCreation {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<TxHash>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokenListing {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub decimal: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default, rename = "imageurl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPagination {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokenPage {
    #[serde(default)]
    pub data: Option<Vec<RawTokenListing>>,
    #[serde(default)]
    pub pagination: Option<RawPagination>,
}

/// Token directory payload: `{success, data: {data: [...], pagination: {total}}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokenSearch {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<RawTokenPage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

// --- Requests ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmountType {
    #[default]
    AmountIn,
    AmountOut,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    pub token_in: String,
    pub token_out: String,
    pub amount: f64,
    pub amount_type: AmountType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOrder {
    pub token_in: String,
    pub token_out: String,
    pub amount: f64,
    pub in_decimals: u32,
    pub out_decimals: u32,
    /// Percent, e.g. `0.5`.
    pub slippage: f64,
    pub approve_tokens: bool,
}

#[derive(Debug, Clone)]
pub struct CurveLaunch {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: RemoteImage,
    pub amount_in: String,
    pub home_page: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}
