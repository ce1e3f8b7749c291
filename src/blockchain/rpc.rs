// src/blockchain/rpc.rs

use anyhow::{anyhow, Context, Result};
use ethers_core::abi::{decode, encode, ParamType, Token};
use ethers_core::types::{Bytes, U256};
use ethers_core::utils::keccak256;
use reqwest::Client;
use serde_json::{json, Value};

/// Sends one JSON-RPC request and returns its `result`.
pub async fn rpc_call(client: &Client, rpc_url: &str, method: &str, params: Value) -> Result<Value> {
    let payload = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1
    });
    let resp: Value = client
        .post(rpc_url)
        .json(&payload)
        .send()
        .await
        .with_context(|| format!("{} request failed", method))?
        .json()
        .await
        .with_context(|| format!("{} returned a non-JSON body", method))?;
    if let Some(err) = resp.get("error") {
        return Err(anyhow!("RPC error in {}: {}", method, err));
    }
    resp.get("result")
        .cloned()
        .ok_or_else(|| anyhow!("RPC response to {} missing 'result' field", method))
}

/// Decodes a hex quantity such as `"0x1bc16d674ec80000"`.
pub fn parse_quantity(v: &Value) -> Result<U256> {
    let s = v.as_str().ok_or_else(|| anyhow!("expected hex quantity, got {}", v))?;
    Ok(U256::from_str_radix(s.trim_start_matches("0x"), 16)?)
}

fn selector(sig: &str) -> [u8; 4] {
    let mut sel = [0u8; 4];
    sel.copy_from_slice(&keccak256(sig.as_bytes())[0..4]);
    sel
}

fn hex_to_bytes(v: &Value) -> Result<Vec<u8>> {
    let s = v.as_str().ok_or_else(|| anyhow!("eth_call result not string"))?;
    let s = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(s)?)
}

/// ABI string, falling back to a zero-padded bytes32 (older tokens).
pub fn decode_string(v: &Value) -> Option<String> {
    let bytes = hex_to_bytes(v).ok()?;
    if let Ok(tokens) = decode(&[ParamType::String], &bytes) {
        if let Some(Token::String(s)) = tokens.into_iter().next() {
            return Some(s);
        }
    }
    if let Ok(tokens) = decode(&[ParamType::FixedBytes(32)], &bytes) {
        if let Some(Token::FixedBytes(b)) = tokens.into_iter().next() {
            return String::from_utf8(b.into_iter().take_while(|c| *c != 0).collect()).ok();
        }
    }
    None
}

pub fn decode_u256(v: &Value) -> Option<U256> {
    let bytes = hex_to_bytes(v).ok()?;
    match decode(&[ParamType::Uint(256)], &bytes).ok()?.into_iter().next() {
        Some(Token::Uint(n)) => Some(n),
        _ => None,
    }
}

pub fn encode_call(sig: &str, tokens: Vec<Token>) -> Bytes {
    let mut out = selector(sig).to_vec();
    out.extend(encode(&tokens));
    Bytes::from(out)
}

pub async fn eth_call(client: &Client, rpc_url: &str, to: &str, data: Bytes) -> Result<Value> {
    rpc_call(
        client,
        rpc_url,
        "eth_call",
        json!([{"to": to, "data": format!("0x{}", hex::encode(data))}, "latest"]),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_selector() {
        let data = encode_call("transfer(address,uint256)", vec![]);
        assert_eq!(hex::encode(&data), "a9059cbb");
    }

    #[test]
    fn test_decode_abi_values() {
        let encoded = format!("0x{}", hex::encode(encode(&[Token::String("Wrapped MON".into())])));
        assert_eq!(decode_string(&json!(encoded)).as_deref(), Some("Wrapped MON"));

        let eighteen = format!("0x{}", hex::encode(encode(&[Token::Uint(U256::from(18))])));
        assert_eq!(decode_u256(&json!(eighteen)), Some(U256::from(18)));
        assert_eq!(parse_quantity(&json!("0x12")).unwrap(), U256::from(18));
    }
}
