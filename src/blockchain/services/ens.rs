// src/blockchain/services/ens.rs

use super::require;
use crate::blockchain::models::{
    DomainPriceResponse, DomainRegistrationResponse, NamesResponse, PrimaryNameResponse,
    ProfileResponse, ResolvedNameResponse,
};
use crate::blockchain::provider::ActionProvider;
use crate::blockchain::session::Session;
use crate::error::{AppFault, FaultCode};
use crate::utils::{non_empty, with_hex_prefix};
use tracing::error;

/// Registration period used when the caller gives none, in days.
pub const DEFAULT_DURATION_DAYS: u32 = 365;
pub const DEFAULT_TLD: &str = "nad";

fn require_name(name: &str, code: FaultCode) -> Result<(), AppFault> {
    require(name, code, "Name must be a non-empty string")
}

pub async fn profile(
    provider: &dyn ActionProvider,
    session: &Session,
    name: &str,
) -> Result<ProfileResponse, AppFault> {
    require_name(name, FaultCode::EnsProfileFailed)?;

    let raw = provider.ens_profile(session, name).await.map_err(|e| {
        error!("Error getting profile for {}: {:#}", name, e);
        AppFault::failed(FaultCode::EnsProfileFailed, format!("Failed to get profile for {}", name))
    })?;

    let record = raw.profile.unwrap_or_default();
    let address = non_empty(record.address).ok_or_else(|| {
        AppFault::not_found(FaultCode::EnsProfileNotFound, format!("Profile not found for {}", name))
    })?;

    Ok(ProfileResponse {
        name: name.to_string(),
        address,
        records: record.records,
    })
}

pub async fn resolve(
    provider: &dyn ActionProvider,
    session: &Session,
    name: &str,
) -> Result<ResolvedNameResponse, AppFault> {
    require_name(name, FaultCode::EnsResolveFailed)?;

    let raw = provider.ens_resolve(session, name).await.map_err(|e| {
        error!("Error resolving {}: {:#}", name, e);
        AppFault::failed(FaultCode::EnsResolveFailed, format!("Failed to resolve name {}", name))
    })?;

    let address = non_empty(raw.address).ok_or_else(|| {
        AppFault::not_found(FaultCode::EnsNameNotFound, format!("Name not found: {}", name))
    })?;

    Ok(ResolvedNameResponse {
        name: name.to_string(),
        address,
    })
}

pub async fn primary_name(
    provider: &dyn ActionProvider,
    session: &Session,
    address: &str,
) -> Result<PrimaryNameResponse, AppFault> {
    require(address, FaultCode::InvalidAddress, "Address must be a non-empty string")?;
    let address = with_hex_prefix(address);

    let raw = provider.ens_primary_name(session, &address).await.map_err(|e| {
        error!("Error getting primary name for {}: {:#}", address, e);
        AppFault::failed(
            FaultCode::EnsPrimaryNameFailed,
            format!("Failed to get primary name for {}", address),
        )
    })?;

    Ok(PrimaryNameResponse {
        name: raw.primary_name.unwrap_or_default(),
        address,
    })
}

pub async fn names(
    provider: &dyn ActionProvider,
    session: &Session,
    address: &str,
) -> Result<NamesResponse, AppFault> {
    require(address, FaultCode::InvalidAddress, "Address must be a non-empty string")?;
    let address = with_hex_prefix(address);

    let raw = provider.ens_names(session, &address).await.map_err(|e| {
        error!("Error getting names for {}: {:#}", address, e);
        AppFault::failed(FaultCode::EnsGetNamesFailed, format!("Failed to get names for {}", address))
    })?;

    Ok(NamesResponse {
        names: raw.names.unwrap_or_default(),
        address,
    })
}

pub async fn domain_price(
    provider: &dyn ActionProvider,
    session: &Session,
    name: &str,
    duration: Option<u32>,
) -> Result<DomainPriceResponse, AppFault> {
    require_name(name, FaultCode::EnsPriceFailed)?;
    let duration = duration.unwrap_or(DEFAULT_DURATION_DAYS);

    let failure = || AppFault::failed(FaultCode::EnsPriceFailed, format!("Failed to get price for {}", name));

    let raw = provider.ens_domain_price(session, name, duration).await.map_err(|e| {
        error!("Error getting price for {}: {:#}", name, e);
        failure()
    })?;

    if !raw.success {
        let reason = non_empty(raw.error).unwrap_or_else(|| format!("Could not get price for {}", name));
        return Err(AppFault::failed(FaultCode::EnsPriceFailed, reason));
    }
    let price = non_empty(raw.price).ok_or_else(failure)?;

    Ok(DomainPriceResponse {
        name: name.to_string(),
        duration,
        price,
    })
}

pub async fn register(
    provider: &dyn ActionProvider,
    session: &Session,
    name: &str,
    tld: Option<&str>,
    duration: Option<u32>,
) -> Result<DomainRegistrationResponse, AppFault> {
    require_name(name, FaultCode::EnsRegisterFailed)?;
    let tld = non_empty(tld.map(str::to_string)).unwrap_or_else(|| DEFAULT_TLD.to_string());
    let duration = duration.unwrap_or(DEFAULT_DURATION_DAYS);
    let full_name = format!("{}.{}", name, tld);

    let failure = || AppFault::failed(FaultCode::EnsRegisterFailed, format!("Failed to register {}", full_name));

    let raw = provider.ens_register(session, name, &tld, duration).await.map_err(|e| {
        error!("Error registering {}: {:#}", full_name, e);
        failure()
    })?;
    let tx_hash = non_empty(raw.transaction_hash).ok_or_else(failure)?;

    Ok(DomainRegistrationResponse {
        name: full_name,
        tx_hash,
        duration,
    })
}
