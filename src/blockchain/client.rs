// src/blockchain/client.rs

//! Client facade over the action adapters.
//!
//! `MonadClient` owns the session and the provider and exposes one method
//! per operation. It adds no logic of its own: every call is handed to the
//! matching adapter in [`crate::blockchain::services`].

use std::sync::Arc;

use crate::blockchain::{
    models::*,
    provider::{ActionProvider, AmountType},
    services::{ens, erc20, kuru, nadfun, native, shmonad, token},
    session::{Session, SessionError},
};
use crate::error::AppFault;

pub use crate::blockchain::services::nadfun::CurveParams;

/// Main client for running tool operations against Monad.
#[derive(Clone)]
pub struct MonadClient {
    provider: Arc<dyn ActionProvider>,
    session: Arc<Session>,
}

impl MonadClient {
    pub fn new(provider: Arc<dyn ActionProvider>, session: Session) -> Self {
        Self {
            provider,
            session: Arc::new(session),
        }
    }

    /// Builds the session from a raw private key (with or without `0x`).
    pub fn connect(
        private_key: &str,
        rpc_url: &str,
        provider: Arc<dyn ActionProvider>,
    ) -> Result<Self, SessionError> {
        Ok(Self::new(provider, Session::new(private_key, rpc_url)?))
    }

    pub fn wallet_address(&self) -> &str {
        self.session.wallet_address()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn provider(&self) -> &dyn ActionProvider {
        self.provider.as_ref()
    }

    /// Get the native balance of an address (the wallet when omitted)
    pub async fn get_balance(&self, address: Option<&str>) -> Result<BalanceResponse, AppFault> {
        native::get_balance(self.provider(), &self.session, address).await
    }

    /// Send native MON
    pub async fn transfer_eth(&self, to: &str, amount: &str) -> Result<TransactionResponse, AppFault> {
        native::transfer(self.provider(), &self.session, to, amount).await
    }

    pub async fn get_token_balance(
        &self,
        token: &str,
        owner: Option<&str>,
    ) -> Result<TokenBalanceResponse, AppFault> {
        erc20::get_balance(self.provider(), &self.session, token, owner).await
    }

    pub async fn transfer_token(
        &self,
        token: &str,
        to: &str,
        amount: &str,
    ) -> Result<TokenTransferResponse, AppFault> {
        erc20::transfer(self.provider(), &self.session, token, to, amount).await
    }

    pub async fn approve_token(
        &self,
        token: &str,
        spender: &str,
        amount: &str,
    ) -> Result<TokenApprovalResponse, AppFault> {
        erc20::approve(self.provider(), &self.session, token, spender, amount).await
    }

    pub async fn get_token_allowance(
        &self,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<TokenAllowanceResponse, AppFault> {
        erc20::allowance(self.provider(), &self.session, token, owner, spender).await
    }

    pub async fn get_token_info(&self, token: &str) -> Result<TokenInfoResponse, AppFault> {
        erc20::info(self.provider(), &self.session, token).await
    }

    pub async fn get_ens_profile(&self, name: &str) -> Result<ProfileResponse, AppFault> {
        ens::profile(self.provider(), &self.session, name).await
    }

    pub async fn resolve_ens_name(&self, name: &str) -> Result<ResolvedNameResponse, AppFault> {
        ens::resolve(self.provider(), &self.session, name).await
    }

    pub async fn get_primary_ens_name(&self, address: &str) -> Result<PrimaryNameResponse, AppFault> {
        ens::primary_name(self.provider(), &self.session, address).await
    }

    pub async fn get_ens_names(&self, address: &str) -> Result<NamesResponse, AppFault> {
        ens::names(self.provider(), &self.session, address).await
    }

    pub async fn get_ens_domain_price(
        &self,
        name: &str,
        duration: Option<u32>,
    ) -> Result<DomainPriceResponse, AppFault> {
        ens::domain_price(self.provider(), &self.session, name, duration).await
    }

    pub async fn register_ens_domain(
        &self,
        name: &str,
        tld: Option<&str>,
        duration: Option<u32>,
    ) -> Result<DomainRegistrationResponse, AppFault> {
        ens::register(self.provider(), &self.session, name, tld, duration).await
    }

    pub async fn get_kuru_price(
        &self,
        token_in: &str,
        token_out: &str,
        amount: f64,
        amount_type: Option<AmountType>,
    ) -> Result<PriceQuoteResponse, AppFault> {
        kuru::price(self.provider(), &self.session, token_in, token_out, amount, amount_type).await
    }

    pub async fn swap_on_kuru(
        &self,
        token_in: &str,
        token_out: &str,
        amount: f64,
        slippage: Option<f64>,
    ) -> Result<SwapResponse, AppFault> {
        kuru::swap(self.provider(), &self.session, token_in, token_out, amount, slippage).await
    }

    pub async fn stake(&self, amount: f64) -> Result<StakeResponse, AppFault> {
        shmonad::stake(self.provider(), &self.session, amount).await
    }

    pub async fn unstake(&self, shares: f64) -> Result<StakeResponse, AppFault> {
        shmonad::unstake(self.provider(), &self.session, shares).await
    }

    pub async fn create_curve_with_metadata(
        &self,
        params: CurveParams,
    ) -> Result<CurveCreationResponse, AppFault> {
        nadfun::create_curve(self.provider(), &self.session, params).await
    }

    pub async fn search_tokens(&self, query: &str) -> Result<TokenSearchResponse, AppFault> {
        token::search(self.provider(), query).await
    }
}
