// src/blockchain/models.rs
use serde::Serialize;
use std::collections::BTreeMap;

// --- Native ---

/// Native balance of an address, in whole MON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address: String,
    pub balance: String,
}

/// A submitted native transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub amount: String,
}

// --- ERC-20 ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceResponse {
    pub address: String,
    pub token_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransferResponse {
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub token_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenApprovalResponse {
    pub tx_hash: String,
    pub token_address: String,
    pub spender: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllowanceResponse {
    pub token_address: String,
    pub owner_address: String,
    pub spender_address: String,
    pub allowance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoResponse {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    pub total_supply: String,
}

// --- Name service ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub name: String,
    pub address: String,
    pub records: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNameResponse {
    pub name: String,
    pub address: String,
}

/// Reverse lookup result. `name` is empty when no primary name is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryNameResponse {
    pub address: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamesResponse {
    pub address: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPriceResponse {
    pub name: String,
    /// Registration period in days.
    pub duration: u32,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRegistrationResponse {
    /// Fully qualified, `name.tld`.
    pub name: String,
    pub tx_hash: String,
    pub duration: u32,
}

// --- DEX ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteResponse {
    pub output: String,
    pub price_impact: f64,
    pub route: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    pub tx_hash: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out: String,
}

// --- Staking, token creation ---

/// Receipt of a stake or unstake submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeResponse {
    pub tx_hash: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveCreationResponse {
    pub tx_hash: String,
    pub status: String,
    pub message: String,
}

// --- Token search ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListing {
    pub address: String,
    pub name: String,
    pub ticker: String,
    pub decimals: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSearchResponse {
    pub query: String,
    pub tokens: Vec<TokenListing>,
    /// Matches in the directory; may exceed `tokens.len()`.
    pub total: u64,
}

/// Typed result of any tool, one variant per result kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OperationResult {
    Balance(BalanceResponse),
    Transfer(TransactionResponse),
    TokenBalance(TokenBalanceResponse),
    TokenTransfer(TokenTransferResponse),
    TokenApproval(TokenApprovalResponse),
    TokenAllowance(TokenAllowanceResponse),
    TokenInfo(TokenInfoResponse),
    Profile(ProfileResponse),
    ResolvedName(ResolvedNameResponse),
    PrimaryName(PrimaryNameResponse),
    Names(NamesResponse),
    DomainPrice(DomainPriceResponse),
    DomainRegistration(DomainRegistrationResponse),
    PriceQuote(PriceQuoteResponse),
    Swap(SwapResponse),
    Stake(StakeResponse),
    Unstake(StakeResponse),
    CurveCreation(CurveCreationResponse),
    TokenSearch(TokenSearchResponse),
}

macro_rules! impl_into_operation_result {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for OperationResult {
                fn from(value: $ty) -> Self {
                    OperationResult::$variant(value)
                }
            }
        )*
    };
}

impl_into_operation_result! {
    BalanceResponse => Balance,
    TransactionResponse => Transfer,
    TokenBalanceResponse => TokenBalance,
    TokenTransferResponse => TokenTransfer,
    TokenApprovalResponse => TokenApproval,
    TokenAllowanceResponse => TokenAllowance,
    TokenInfoResponse => TokenInfo,
    ProfileResponse => Profile,
    ResolvedNameResponse => ResolvedName,
    PrimaryNameResponse => PrimaryName,
    NamesResponse => Names,
    DomainPriceResponse => DomainPrice,
    DomainRegistrationResponse => DomainRegistration,
    PriceQuoteResponse => PriceQuote,
    SwapResponse => Swap,
    CurveCreationResponse => CurveCreation,
    TokenSearchResponse => TokenSearch,
}
