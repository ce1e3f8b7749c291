// src/blockchain/services/mod.rs

//! # Action Adapters
//!
//! One module per tool family. Every adapter follows the same steps: check
//! the domain preconditions, call the [`ActionProvider`], treat an error
//! status in the raw result like a failed call, fill in defaults, and return
//! a typed model. Every failure leaves as an [`AppFault`] with the family's
//! code.
//!
//! [`ActionProvider`]: crate::blockchain::provider::ActionProvider
//! [`AppFault`]: crate::error::AppFault

pub mod ens;
pub mod erc20;
pub mod kuru;
pub mod nadfun;
pub mod native;
pub mod shmonad;
pub mod token;

use crate::blockchain::provider::TxHash;
use crate::error::{AppFault, FaultCode};
use crate::utils::{is_blank, non_empty};

/// Normalizes an optional hash of either shape to a string, empty if absent.
pub(crate) fn hash_string(hash: Option<TxHash>) -> String {
    non_empty(hash.and_then(TxHash::into_hash)).unwrap_or_default()
}

/// Turns a raw `status: "error"` into a fault carrying the provider message.
pub(crate) fn check_status(
    status: Option<&str>,
    message: Option<&str>,
    code: FaultCode,
    fallback: &str,
) -> Result<(), AppFault> {
    if status == Some("error") {
        let message = message.filter(|m| !is_blank(m)).unwrap_or(fallback);
        return Err(AppFault::failed(code, message));
    }
    Ok(())
}

/// Rejects blank address-like arguments with a 400 fault.
pub(crate) fn require(value: &str, code: FaultCode, message: &str) -> Result<(), AppFault> {
    if is_blank(value) {
        return Err(AppFault::bad_request(code, message));
    }
    Ok(())
}

/// Rejects amounts that are not finite and strictly positive.
pub(crate) fn require_positive(value: f64, code: FaultCode, message: &str) -> Result<(), AppFault> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppFault::bad_request(code, message));
    }
    Ok(())
}
