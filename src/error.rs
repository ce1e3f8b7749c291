// src/error.rs

//! # Error Taxonomy
//!
//! Two kinds of failure can come out of a tool invocation:
//!
//! - [`ProtocolFault`]: the request itself is wrong (unknown tool, arguments
//!   that violate the tool's input schema). Reported as a JSON-RPC error.
//! - [`AppFault`]: the request was well formed but the operation could not be
//!   carried out. Reported as a successful response flagged `isError` so the
//!   calling agent can read the message and recover.
//!
//! [`ToolError`] is the tagged outcome carrying one or the other.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Stable, machine-readable codes for application faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCode {
    // native
    GetBalanceFailed,
    TransferFailed,
    InvalidAddress,
    // erc20
    InvalidTokenAddress,
    TokenBalanceFailed,
    TokenTransferFailed,
    TokenApprovalFailed,
    TokenAllowanceFailed,
    TokenInfoFailed,
    // name service
    EnsProfileNotFound,
    EnsProfileFailed,
    EnsNameNotFound,
    EnsResolveFailed,
    EnsPrimaryNameFailed,
    EnsGetNamesFailed,
    EnsPriceFailed,
    EnsRegisterFailed,
    // dex
    InvalidAmount,
    PriceFetchFailed,
    SwapFailed,
    // staking
    InvalidShares,
    StakeFailed,
    UnstakeFailed,
    // token creation
    InvalidParameters,
    InvalidImage,
    ImageDownloadFailed,
    CurveCreationFailed,
    // token search
    InvalidQuery,
    TokenSearchFailed,
    // catch-all for unclassified failures inside a tool
    OperationFailed,
}

impl FaultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultCode::GetBalanceFailed => "get_balance_failed",
            FaultCode::TransferFailed => "transfer_failed",
            FaultCode::InvalidAddress => "invalid_address",
            FaultCode::InvalidTokenAddress => "invalid_token_address",
            FaultCode::TokenBalanceFailed => "token_balance_failed",
            FaultCode::TokenTransferFailed => "token_transfer_failed",
            FaultCode::TokenApprovalFailed => "token_approval_failed",
            FaultCode::TokenAllowanceFailed => "token_allowance_failed",
            FaultCode::TokenInfoFailed => "token_info_failed",
            FaultCode::EnsProfileNotFound => "ens_profile_not_found",
            FaultCode::EnsProfileFailed => "ens_profile_failed",
            FaultCode::EnsNameNotFound => "ens_name_not_found",
            FaultCode::EnsResolveFailed => "ens_resolve_failed",
            FaultCode::EnsPrimaryNameFailed => "ens_primary_name_failed",
            FaultCode::EnsGetNamesFailed => "ens_get_names_failed",
            FaultCode::EnsPriceFailed => "ens_price_failed",
            FaultCode::EnsRegisterFailed => "ens_register_failed",
            FaultCode::InvalidAmount => "invalid_amount",
            FaultCode::PriceFetchFailed => "price_fetch_failed",
            FaultCode::SwapFailed => "swap_failed",
            FaultCode::InvalidShares => "invalid_shares",
            FaultCode::StakeFailed => "stake_failed",
            FaultCode::UnstakeFailed => "unstake_failed",
            FaultCode::InvalidParameters => "invalid_parameters",
            FaultCode::InvalidImage => "invalid_image",
            FaultCode::ImageDownloadFailed => "image_download_failed",
            FaultCode::CurveCreationFailed => "curve_creation_failed",
            FaultCode::InvalidQuery => "invalid_query",
            FaultCode::TokenSearchFailed => "token_search_failed",
            FaultCode::OperationFailed => "operation_failed",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable, domain-level failure of a tool invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct AppFault {
    pub message: String,
    pub code: FaultCode,
    pub status: u16,
}

impl AppFault {
    pub fn new(code: FaultCode, message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            code,
            status,
        }
    }

    /// Caller supplied bad input (400).
    pub fn bad_request(code: FaultCode, message: impl Into<String>) -> Self {
        Self::new(code, message, 400)
    }

    /// The looked-up entity does not exist (404).
    pub fn not_found(code: FaultCode, message: impl Into<String>) -> Self {
        Self::new(code, message, 404)
    }

    /// The provider failed or reported an error (500).
    pub fn failed(code: FaultCode, message: impl Into<String>) -> Self {
        Self::new(code, message, 500)
    }
}

/// One schema violation found in the raw arguments of a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The request could not be routed or its arguments do not fit the contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolFault {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments: {}", join_violations(.0))]
    InvalidParams(Vec<Violation>),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a failed tool invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error(transparent)]
    Protocol(#[from] ProtocolFault),
    #[error(transparent)]
    Application(#[from] AppFault),
}

impl ToolError {
    pub fn app_fault(&self) -> Option<&AppFault> {
        match self {
            ToolError::Application(fault) => Some(fault),
            ToolError::Protocol(_) => None,
        }
    }
}
