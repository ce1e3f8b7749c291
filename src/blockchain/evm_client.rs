// src/blockchain/evm_client.rs

//! Default [`ActionProvider`].
//!
//! Native and ERC-20 operations go straight to the EVM JSON-RPC endpoint of
//! the session and are signed locally. Name service, Kuru, shMonad and
//! nad.fun actions are forwarded to an agent-kit bridge over HTTP. Token
//! search hits the Kuru token directory.

use crate::blockchain::{
    nonce_manager::NonceManager,
    provider::*,
    rpc::{decode_string, decode_u256, encode_call, eth_call, parse_quantity, rpc_call},
    session::Session,
    transactions::send_transaction,
};
use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64STD;
use base64::Engine;
use ethers::utils::{format_ether, format_units, parse_ether, parse_units};
use ethers_core::abi::Token;
use ethers_core::types::{Address, TransactionRequest, U256};
use ethers_signers::Signer;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::str::FromStr;
use tracing::{debug, warn};
use url::Url;

const DEFAULT_DECIMALS: u32 = 18;

/// Strips trailing zeros from a fixed-point string: `"5.000"` becomes `"5"`.
fn compact(amount: String) -> String {
    if !amount.contains('.') {
        return amount;
    }
    amount.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn parse_address(value: &str, what: &str) -> Result<Address> {
    Address::from_str(value.trim()).with_context(|| format!("invalid {} address: {}", what, value))
}

#[derive(Clone)]
pub struct EvmActionProvider {
    http: Client,
    nonce_manager: NonceManager,
    token_api_url: String,
    agent_kit_url: Option<String>,
}

impl EvmActionProvider {
    pub fn new(token_api_url: impl Into<String>, agent_kit_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            nonce_manager: NonceManager::new(),
            token_api_url: token_api_url.into(),
            agent_kit_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.token_api_url.clone(), config.agent_kit_url.clone())
    }

    /// Signs and sends `tx`; a failed submission drops the cached nonce.
    async fn submit(&self, session: &Session, tx: TransactionRequest) -> Result<String> {
        let result = send_transaction(&self.http, session, tx, &self.nonce_manager).await;
        if result.is_err() {
            self.nonce_manager.reset(&session.signer().address());
        }
        result
    }

    async fn token_decimals(&self, rpc_url: &str, token: &str) -> Result<u32> {
        let raw = eth_call(&self.http, rpc_url, token, encode_call("decimals()", vec![]))
            .await
            .with_context(|| format!("Failed to read decimals of {}", token))?;
        match decode_u256(&raw) {
            Some(n) if n <= U256::from(u8::MAX) => Ok(n.as_u32()),
            _ => bail!("token {} returned invalid decimals", token),
        }
    }

    /// Decimals for display only; never used to scale an amount we sign.
    async fn display_decimals(&self, rpc_url: &str, token: &str) -> u32 {
        self.token_decimals(rpc_url, token).await.unwrap_or_else(|e| {
            warn!("{:#}, assuming {}", e, DEFAULT_DECIMALS);
            DEFAULT_DECIMALS
        })
    }

    async fn token_string(&self, rpc_url: &str, token: &str, sig: &str) -> Option<String> {
        let raw = eth_call(&self.http, rpc_url, token, encode_call(sig, vec![])).await.ok()?;
        decode_string(&raw)
    }

    async fn token_u256(&self, rpc_url: &str, token: &str, sig: &str, args: Vec<Token>) -> Result<U256> {
        let raw = eth_call(&self.http, rpc_url, token, encode_call(sig, args)).await?;
        decode_u256(&raw).ok_or_else(|| anyhow!("could not decode {} result from {}", sig, token))
    }

    async fn token_write(
        &self,
        session: &Session,
        token: &str,
        sig: &str,
        counterparty: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer> {
        let contract = parse_address(token, "token")?;
        let counterparty = parse_address(counterparty, "counterparty")?;
        let decimals = self.token_decimals(session.rpc_url(), token).await?;
        let value: U256 = parse_units(amount.trim(), decimals)
            .with_context(|| format!("invalid token amount: {}", amount))?
            .into();

        let data = encode_call(sig, vec![Token::Address(counterparty), Token::Uint(value)]);
        let tx = TransactionRequest::new().to(contract).data(data);
        let hash = self.submit(session, tx).await?;

        Ok(RawTokenTransfer {
            status: Some("success".to_string()),
            message: None,
            tx_hash: Some(TxHash::Plain(hash)),
        })
    }

    /// POSTs an action to the agent-kit bridge on behalf of the session wallet.
    async fn bridge<T: DeserializeOwned>(&self, session: &Session, action: &str, mut body: Value) -> Result<T> {
        let base = self
            .agent_kit_url
            .as_deref()
            .ok_or_else(|| anyhow!("'{}' requires AGENT_KIT_URL to be configured", action))?;
        let url = format!("{}/actions/{}", base.trim_end_matches('/'), action);

        if let Value::Object(map) = &mut body {
            map.insert("wallet".to_string(), json!(session.wallet_address()));
        }
        debug!("Forwarding {} to agent kit", action);

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to call agent kit action {}", action))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("Agent kit error: status={} body={}", status, text);
        }

        resp.json()
            .await
            .with_context(|| format!("Invalid agent kit response for {}", action))
    }
}

#[async_trait]
impl ActionProvider for EvmActionProvider {
    async fn get_balance(&self, session: &Session, address: &str) -> Result<RawBalance> {
        let result = rpc_call(&self.http, session.rpc_url(), "eth_getBalance", json!([address, "latest"])).await?;
        let wei = parse_quantity(&result)?;
        Ok(RawBalance {
            balance: Some(compact(format_ether(wei))),
        })
    }

    async fn transfer_native(&self, session: &Session, to: &str, amount: &str) -> Result<RawTransfer> {
        let to = parse_address(to, "recipient")?;
        let value = parse_ether(amount.trim()).with_context(|| format!("invalid amount: {}", amount))?;
        let hash = self.submit(session, TransactionRequest::new().to(to).value(value)).await?;
        Ok(RawTransfer {
            tx_hash: Some(TxHash::Plain(hash)),
        })
    }

    async fn token_balance(&self, session: &Session, token: &str, owner: &str) -> Result<RawTokenBalance> {
        let owner_addr = parse_address(owner, "owner")?;
        let rpc_url = session.rpc_url();
        let balance = self
            .token_u256(rpc_url, token, "balanceOf(address)", vec![Token::Address(owner_addr)])
            .await?;
        let decimals = self.display_decimals(rpc_url, token).await;

        Ok(RawTokenBalance {
            status: Some("success".to_string()),
            message: None,
            balance: Some(compact(format_units(balance, decimals)?)),
            token_name: self.token_string(rpc_url, token, "name()").await,
            owner_address: Some(owner.to_string()),
        })
    }

    async fn transfer_token(&self, session: &Session, token: &str, to: &str, amount: &str) -> Result<RawTokenTransfer> {
        self.token_write(session, token, "transfer(address,uint256)", to, amount).await
    }

    async fn approve_token(
        &self,
        session: &Session,
        token: &str,
        spender: &str,
        amount: &str,
    ) -> Result<RawTokenTransfer> {
        self.token_write(session, token, "approve(address,uint256)", spender, amount).await
    }

    async fn token_allowance(
        &self,
        session: &Session,
        token: &str,
        owner: &str,
        spender: &str,
    ) -> Result<RawTokenAllowance> {
        let args = vec![
            Token::Address(parse_address(owner, "owner")?),
            Token::Address(parse_address(spender, "spender")?),
        ];
        let rpc_url = session.rpc_url();
        let allowance = self.token_u256(rpc_url, token, "allowance(address,address)", args).await?;
        let decimals = self.display_decimals(rpc_url, token).await;

        Ok(RawTokenAllowance {
            status: Some("success".to_string()),
            message: None,
            allowance: Some(compact(format_units(allowance, decimals)?)),
        })
    }

    async fn token_info(&self, session: &Session, token: &str) -> Result<RawTokenInfo> {
        let rpc_url = session.rpc_url();
        let decimals = self.display_decimals(rpc_url, token).await;
        let total_supply = self.token_u256(rpc_url, token, "totalSupply()", vec![]).await?;

        Ok(RawTokenInfo {
            status: Some("success".to_string()),
            message: None,
            info: Some(RawTokenMetadata {
                name: self.token_string(rpc_url, token, "name()").await,
                symbol: self.token_string(rpc_url, token, "symbol()").await,
                decimals: Some(decimals),
                total_supply: Some(compact(format_units(total_supply, decimals)?)),
            }),
            fields: RawTokenMetadata::default(),
        })
    }

    async fn ens_profile(&self, session: &Session, name: &str) -> Result<RawEnsProfile> {
        self.bridge(session, "getProfile", json!({ "name": name })).await
    }

    async fn ens_resolve(&self, session: &Session, name: &str) -> Result<RawEnsResolution> {
        self.bridge(session, "resolveAddress", json!({ "name": name })).await
    }

    async fn ens_primary_name(&self, session: &Session, address: &str) -> Result<RawEnsPrimaryName> {
        self.bridge(session, "getPrimaryName", json!({ "address": address })).await
    }

    async fn ens_names(&self, session: &Session, address: &str) -> Result<RawEnsNames> {
        self.bridge(session, "getNamesForAddress", json!({ "address": address })).await
    }

    async fn ens_domain_price(&self, session: &Session, name: &str, duration: u32) -> Result<RawDomainPrice> {
        self.bridge(session, "getDomainPrice", json!({ "name": name, "duration": duration }))
            .await
    }

    async fn ens_register(
        &self,
        session: &Session,
        name: &str,
        tld: &str,
        duration: u32,
    ) -> Result<RawDomainRegistration> {
        self.bridge(
            session,
            "registerDomain",
            json!({ "name": name, "tld": tld, "duration": duration }),
        )
        .await
    }

    async fn dex_price(&self, session: &Session, query: &PriceQuery) -> Result<RawPriceQuote> {
        self.bridge(session, "getPrice", serde_json::to_value(query)?).await
    }

    async fn dex_swap(&self, session: &Session, order: &SwapOrder) -> Result<RawSwap> {
        self.bridge(session, "swap", serde_json::to_value(order)?).await
    }

    async fn stake(&self, session: &Session, amount: f64) -> Result<RawStakeReceipt> {
        self.bridge(session, "stake", json!({ "amount": amount })).await
    }

    async fn unstake(&self, session: &Session, shares: f64) -> Result<RawStakeReceipt> {
        self.bridge(session, "unstake", json!({ "shares": shares })).await
    }

    async fn create_curve(&self, session: &Session, launch: &CurveLaunch) -> Result<RawCurveCreation> {
        let body = json!({
            "name": launch.name,
            "symbol": launch.symbol,
            "description": launch.description,
            "image": BASE64STD.encode(&launch.image.bytes),
            "imageContentType": launch.image.content_type,
            "amountIn": launch.amount_in,
            "homePage": launch.home_page,
            "twitter": launch.twitter,
            "telegram": launch.telegram,
        });
        self.bridge(session, "createCurveWithMetadata", body).await
    }

    async fn search_tokens(&self, name: Option<&str>, limit: u32) -> Result<RawTokenSearch> {
        let mut url = Url::parse(&self.token_api_url)
            .with_context(|| format!("invalid token API URL: {}", self.token_api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("token API URL cannot carry a path: {}", self.token_api_url))?
            .pop_if_empty()
            .extend(["api", "v2", "tokens", "search"]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        if let Some(name) = name {
            url.query_pairs_mut().append_pair("name", name);
        }

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to call token directory")?;
        if !resp.status().is_success() {
            bail!("Token directory error: status={}", resp.status());
        }
        resp.json().await.context("Invalid token directory response")
    }

    async fn fetch_image(&self, url: &str) -> Result<RemoteImage> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        if !resp.status().is_success() {
            bail!("Image download failed: status={}", resp.status());
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = resp.bytes().await?.to_vec();

        Ok(RemoteImage { bytes, content_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{mock, server_url, Matcher};

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn session(path: &str) -> Session {
        Session::new(KEY, &format!("{}{}", server_url(), path)).unwrap()
    }

    #[test]
    fn test_compact_trims_trailing_zeros() {
        assert_eq!(compact("5.000000000000000000".into()), "5");
        assert_eq!(compact("0.250000".into()), "0.25");
        assert_eq!(compact("100".into()), "100");
    }

    #[tokio::test]
    async fn test_native_balance_is_read_over_json_rpc() {
        let _m = mock("POST", "/balance-rpc")
            .match_body(Matcher::PartialJson(json!({"method": "eth_getBalance"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x4563918244f40000"}"#)
            .create();

        let provider = EvmActionProvider::new(server_url(), None);
        let raw = provider.get_balance(&session("/balance-rpc"), ADDRESS).await.unwrap();
        assert_eq!(raw.balance.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_rpc_error_is_reported() {
        let _m = mock("POST", "/failing-rpc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"boom"}}"#)
            .create();

        let provider = EvmActionProvider::new(server_url(), None);
        let err = provider.get_balance(&session("/failing-rpc"), ADDRESS).await.unwrap_err();
        assert!(err.to_string().contains("eth_getBalance"));
    }

    #[tokio::test]
    async fn test_search_tokens_queries_directory() {
        let _m = mock("GET", Matcher::Regex(r"^/api/v2/tokens/search".to_string()))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "20".into()),
                Matcher::UrlEncoded("name".into(), "wmon".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "data": [{"address": "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701", "decimal": 18, "name": "Wrapped MON", "ticker": "WMON"}],
                        "pagination": {"total": 1}
                    }
                })
                .to_string(),
            )
            .create();

        let provider = EvmActionProvider::new(server_url(), None);
        let raw = provider.search_tokens(Some("wmon"), 20).await.unwrap();
        assert!(raw.success);
        let listings = raw.data.and_then(|p| p.data).unwrap();
        assert_eq!(listings[0].ticker.as_deref(), Some("WMON"));
    }

    #[tokio::test]
    async fn test_search_tokens_keeps_base_path() {
        let _m = mock("GET", Matcher::Regex(r"^/kuru/api/v2/tokens/search".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":{"data":[],"pagination":{"total":0}}}"#)
            .create();

        let provider = EvmActionProvider::new(format!("{}/kuru", server_url()), None);
        let raw = provider.search_tokens(None, 20).await.unwrap();
        assert!(raw.success);
    }

    #[tokio::test]
    async fn test_fetch_image_keeps_content_type() {
        let _m = mock("GET", "/images/cat.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(vec![0x89, b'P', b'N', b'G'])
            .create();

        let provider = EvmActionProvider::new(server_url(), None);
        let image = provider
            .fetch_image(&format!("{}/images/cat.png", server_url()))
            .await
            .unwrap();
        assert_eq!(image.content_type.as_deref(), Some("image/png"));
        assert_eq!(image.bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_token_write_aborts_when_decimals_are_unreadable() {
        let _call = mock("POST", "/no-decimals-rpc")
            .match_body(Matcher::PartialJson(json!({"method": "eth_call"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#)
            .create();
        let broadcast = mock("POST", "/no-decimals-rpc")
            .match_body(Matcher::PartialJson(json!({"method": "eth_sendRawTransaction"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0xsent"}"#)
            .expect(0)
            .create();

        let provider = EvmActionProvider::new(server_url(), None);
        let fault = crate::blockchain::services::erc20::transfer(
            &provider,
            &session("/no-decimals-rpc"),
            "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "10",
        )
        .await
        .unwrap_err();

        assert_eq!(fault.code, crate::error::FaultCode::TokenTransferFailed);
        broadcast.assert();
    }

    #[tokio::test]
    async fn test_bridge_actions_need_agent_kit_url() {
        let provider = EvmActionProvider::new(server_url(), None);
        let err = provider.stake(&session("/unused"), 1.0).await.unwrap_err();
        assert!(err.to_string().contains("AGENT_KIT_URL"));
    }

    #[tokio::test]
    async fn test_bridge_forwards_wallet_address() {
        let _m = mock("POST", "/kit/actions/stake")
            .match_body(Matcher::PartialJson(json!({"wallet": ADDRESS, "amount": 1.5})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"transactionHash":"0xabc","status":"success"}"#)
            .create();

        let provider = EvmActionProvider::new(server_url(), Some(format!("{}/kit", server_url())));
        let receipt = provider.stake(&session("/unused"), 1.5).await.unwrap();
        assert_eq!(receipt.transaction_hash.as_deref(), Some("0xabc"));
        assert_eq!(receipt.status.as_deref(), Some("success"));
    }
}
