//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use monad_mcp_server::{
    blockchain::{provider::*, session::Session},
    config::Config,
    AppState,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// In-memory provider that counts calls and replays canned results.
#[derive(Default)]
pub struct StubProvider {
    pub calls: AtomicUsize,
    pub log: Mutex<Vec<String>>,
    pub fail: bool,
    pub panic_on: Option<&'static str>,
    pub balance: RawBalance,
    pub token_transfer: RawTokenTransfer,
    pub domain_price: RawDomainPrice,
    pub registration: RawDomainRegistration,
    pub swap: RawSwap,
    pub stake_receipt: RawStakeReceipt,
    pub token_search: RawTokenSearch,
    pub image: RemoteImage,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Calls whose log entry starts with `method`.
    pub fn calls_to(&self, method: &str) -> usize {
        self.log().iter().filter(|e| e.split(' ').next() == Some(method)).count()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every call as `"<method> <args..>"`, in order.
    pub fn log(&self) -> Vec<String> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn record(&self, entry: String) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let method = entry.split(' ').next().unwrap_or_default().to_string();
        if let Ok(mut log) = self.log.lock() {
            log.push(entry);
        }
        if self.panic_on == Some(method.as_str()) {
            panic!("stub provider asked to panic in {}", method);
        }
        if self.fail {
            bail!("stub backend unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl ActionProvider for StubProvider {
    async fn get_balance(&self, _session: &Session, address: &str) -> Result<RawBalance> {
        self.record(format!("get_balance {}", address))?;
        Ok(self.balance.clone())
    }

    async fn transfer_native(&self, _session: &Session, to: &str, amount: &str) -> Result<RawTransfer> {
        self.record(format!("transfer_native {} {}", to, amount))?;
        Ok(RawTransfer {
            tx_hash: Some(TxHash::Plain("0xnative".into())),
        })
    }

    async fn token_balance(&self, _session: &Session, token: &str, owner: &str) -> Result<RawTokenBalance> {
        self.record(format!("token_balance {} {}", token, owner))?;
        Ok(RawTokenBalance::default())
    }

    async fn transfer_token(
        &self,
        _session: &Session,
        token: &str,
        to: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer> {
        self.record(format!("transfer_token {} {} {}", token, to, amount))?;
        Ok(self.token_transfer.clone())
    }

    async fn approve_token(
        &self,
        _session: &Session,
        token: &str,
        spender: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer> {
        self.record(format!("approve_token {} {} {}", token, spender, amount))?;
        Ok(self.token_transfer.clone())
    }

    async fn token_allowance(
        &self,
        _session: &Session,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<RawTokenAllowance> {
        self.record(format!("token_allowance {} {} {}", token, owner, spender))?;
        Ok(RawTokenAllowance::default())
    }

    async fn token_info(&self, _session: &Session, token: &str) -> Result<RawTokenInfo> {
        self.record(format!("token_info {}", token))?;
        Ok(RawTokenInfo::default())
    }

    async fn ens_profile(&self, _session: &Session, name: &str) -> Result<RawEnsProfile> {
        self.record(format!("ens_profile {}", name))?;
        Ok(RawEnsProfile::default())
    }

    async fn ens_resolve(&self, _session: &Session, name: &str) -> Result<RawEnsResolution> {
        self.record(format!("ens_resolve {}", name))?;
        Ok(RawEnsResolution::default())
    }

    async fn ens_primary_name(&self, _session: &Session, address: &str) -> Result<RawEnsPrimaryName> {
        self.record(format!("ens_primary_name {}", address))?;
        Ok(RawEnsPrimaryName::default())
    }

    async fn ens_names(&self, _session: &Session, address: &str) -> Result<RawEnsNames> {
        self.record(format!("ens_names {}", address))?;
        Ok(RawEnsNames::default())
    }

    async fn ens_domain_price(&self, _session: &Session, name: &str, duration: u32) -> Result<RawDomainPrice> {
        self.record(format!("ens_domain_price {} {}", name, duration))?;
        Ok(self.domain_price.clone())
    }

    async fn ens_register(
        &self,
        _session: &Session,
        name: &str,
        tld: &str,
        duration: u32,
    ) -> Result<RawDomainRegistration> {
        self.record(format!("ens_register {} {} {}", name, tld, duration))?;
        Ok(self.registration.clone())
    }

    async fn dex_price(&self, _session: &Session, query: &PriceQuery) -> Result<RawPriceQuote> {
        self.record(format!("dex_price {} {} {}", query.token_in, query.token_out, query.amount))?;
        Ok(RawPriceQuote::default())
    }

    async fn dex_swap(&self, _session: &Session, order: &SwapOrder) -> Result<RawSwap> {
        self.record(format!(
            "dex_swap {} {} {} {} decimals={}/{} approve={}",
            order.token_in,
            order.token_out,
            order.amount,
            order.slippage,
            order.in_decimals,
            order.out_decimals,
            order.approve_tokens
        ))?;
        Ok(self.swap.clone())
    }

    async fn stake(&self, _session: &Session, amount: f64) -> Result<RawStakeReceipt> {
        self.record(format!("stake {}", amount))?;
        Ok(self.stake_receipt.clone())
    }

    async fn unstake(&self, _session: &Session, shares: f64) -> Result<RawStakeReceipt> {
        self.record(format!("unstake {}", shares))?;
        Ok(self.stake_receipt.clone())
    }

    async fn create_curve(&self, _session: &Session, launch: &CurveLaunch) -> Result<RawCurveCreation> {
        self.record(format!("create_curve {} {}", launch.symbol, launch.amount_in))?;
        Ok(RawCurveCreation::default())
    }

    async fn search_tokens(&self, name: Option<&str>, limit: u32) -> Result<RawTokenSearch> {
        self.record(format!("search_tokens {} {}", name.unwrap_or_default(), limit))?;
        Ok(self.token_search.clone())
    }

    async fn fetch_image(&self, url: &str) -> Result<RemoteImage> {
        self.record(format!("fetch_image {}", url))?;
        Ok(self.image.clone())
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "WALLET_PRIVATE_KEY" => Some(TEST_KEY.to_string()),
        "MONAD_RPC_URL" => Some("http://127.0.0.1:1".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// App state wired to `provider`, which stays inspectable through the returned Arc.
pub fn test_state(provider: StubProvider) -> (AppState, Arc<StubProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::with_provider(test_config(), provider.clone()).expect("test state");
    (state, provider)
}
