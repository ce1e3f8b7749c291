//! End-to-end behaviour of the tool gateway against a stub provider.

mod common;

use common::{test_state, StubProvider, TEST_ADDRESS};
use monad_mcp_server::{
    blockchain::provider::{
        RawBalance, RawDomainPrice, RawDomainRegistration, RawStakeReceipt, RawTokenSearch, RawTokenTransfer,
        RemoteImage,
    },
    error::{FaultCode, ProtocolFault, ToolError},
    formatter,
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request},
    },
    tools::{erc20, native, ToolRegistry},
};
use serde_json::{json, Value};

fn call(name: &str, arguments: Value) -> Request {
    Request::new(json!(1), "tools/call", Some(json!({ "name": name, "arguments": arguments })))
}

fn directory(success: bool, total: u64) -> RawTokenSearch {
    serde_json::from_value(json!({
        "success": success,
        "data": {
            "data": [
                {"address": "0xB", "decimal": 6, "name": "USD Coin", "ticker": "USDC"},
                {"address": "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701", "decimal": 18, "name": "Wrapped MON", "ticker": "WMON"}
            ],
            "pagination": {"total": total}
        }
    }))
    .unwrap()
}

fn curve_args(amount_in: &str) -> Value {
    json!({
        "name": "Moon Cat",
        "symbol": "MCAT",
        "description": "cats on the moon",
        "imageUrl": "https://example.com/cat.png",
        "amountIn": amount_in,
    })
}

fn result_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_unknown_tool_is_method_not_found() {
    let (state, provider) = test_state(StubProvider::new());

    let resp = handle_mcp_request(call("getWeather", json!({})), state).await.unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
    assert!(error.message.contains("getWeather"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_missing_required_field_never_reaches_provider() {
    let (state, provider) = test_state(StubProvider::new());

    let resp = handle_mcp_request(call("transferETH", json!({ "to": "0xabc" })), state).await.unwrap();

    let error = resp.error.unwrap();
    assert_eq!(error.code, error_codes::INVALID_PARAMS);
    assert!(error.message.contains("amount"));
    assert!(error.data.unwrap()["violations"].is_array());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_balance_defaults_to_wallet() {
    let (state, provider) = test_state(StubProvider {
        balance: RawBalance {
            balance: Some("5".into()),
        },
        ..StubProvider::new()
    });

    let resp = handle_mcp_request(call("getBalance", json!({})), state).await.unwrap();

    let result = resp.result.unwrap();
    assert_eq!(
        result_text(&result),
        format!("Address: {}\nBalance: 5 ETH", TEST_ADDRESS)
    );
    assert_eq!(provider.log(), vec![format!("get_balance {}", TEST_ADDRESS)]);
}

#[tokio::test]
async fn test_tool_name_works_as_method() {
    let (state, provider) = test_state(StubProvider::new());

    let req = Request::new(json!("a"), "getBalance", Some(json!({ "address": "0xdef" })));
    let resp = handle_mcp_request(req, state).await.unwrap();

    assert_eq!(resp.id, json!("a"));
    assert!(result_text(&resp.result.unwrap()).starts_with("Address: 0xdef"));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_register_domain_defaults() {
    let (state, provider) = test_state(StubProvider {
        registration: RawDomainRegistration {
            transaction_hash: Some("0xreg".into()),
        },
        ..StubProvider::new()
    });

    let resp = handle_mcp_request(call("registerENSDomain", json!({ "name": "alice" })), state)
        .await
        .unwrap();

    let text = result_text(&resp.result.unwrap()).to_string();
    assert_eq!(text, "DOMAIN REGISTRATION\nDomain: alice.nad\nHash: 0xreg\nDuration: 365 days");
    assert_eq!(provider.log(), vec!["ens_register alice nad 365".to_string()]);
}

#[tokio::test]
async fn test_domain_price_failure_is_application_fault() {
    let (state, _provider) = test_state(StubProvider {
        domain_price: RawDomainPrice {
            success: false,
            price: None,
            error: Some("Name is reserved".into()),
        },
        ..StubProvider::new()
    });

    let outcome = state.dispatcher.dispatch("getENSDomainPrice", json!({ "name": "admin" })).await;

    let fault = outcome.unwrap_err();
    let fault = fault.app_fault().unwrap();
    assert_eq!(fault.code, FaultCode::EnsPriceFailed);
    assert_eq!(fault.message, "Name is reserved");
}

#[tokio::test]
async fn test_swap_rejects_non_positive_amounts() {
    for amount in [json!(0), json!(-1.5), json!("ten")] {
        let (state, provider) = test_state(StubProvider::new());
        let args = json!({
            "tokenInAddress": "0x0000000000000000000000000000000000000000",
            "tokenOutAddress": "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701",
            "amountToSwap": amount,
        });

        let outcome = state.dispatcher.dispatch("swapOnKuru", args).await;

        assert!(
            matches!(outcome, Err(ToolError::Protocol(ProtocolFault::InvalidParams(_)))),
            "amount {} should be rejected",
            amount
        );
        assert_eq!(provider.calls(), 0);
    }
}

#[tokio::test]
async fn test_swap_applies_default_slippage() {
    let (state, provider) = test_state(StubProvider::new());
    let args = json!({
        "tokenInAddress": "0xa",
        "tokenOutAddress": "0xb",
        "amountToSwap": 2.5,
    });

    state.dispatcher.dispatch("swapOnKuru", args).await.unwrap();

    assert!(provider.log().contains(&"dex_swap 0xa 0xb 2.5 0.5 decimals=18/18 approve=true".to_string()));
}

#[tokio::test]
async fn test_token_transfer_error_status_becomes_is_error_result() {
    let (state, _provider) = test_state(StubProvider {
        token_transfer: RawTokenTransfer {
            status: Some("error".into()),
            message: Some("insufficient balance".into()),
            tx_hash: None,
        },
        ..StubProvider::new()
    });
    let args = json!({ "tokenAddress": "0xtoken", "to": "0xdef", "amount": "10" });

    let outcome = state.dispatcher.dispatch("transferToken", args.clone()).await;
    assert_eq!(outcome.unwrap_err().app_fault().unwrap().code, FaultCode::TokenTransferFailed);

    let resp = handle_mcp_request(call("transferToken", args), state).await.unwrap();
    assert!(resp.error.is_none());
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    assert_eq!(result_text(&result), "Monad blockchain error: insufficient balance");
}

#[tokio::test]
async fn test_backend_failure_keeps_family_code() {
    let (state, provider) = test_state(StubProvider::failing());

    let outcome = state.dispatcher.dispatch("stake", json!({ "amount": 1 })).await;

    assert_eq!(outcome.unwrap_err().app_fault().unwrap().code, FaultCode::StakeFailed);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_panicking_operation_becomes_operation_failed() {
    let (state, _provider) = test_state(StubProvider {
        panic_on: Some("unstake"),
        stake_receipt: RawStakeReceipt::default(),
        ..StubProvider::new()
    });

    let resp = handle_mcp_request(call("unstake", json!({ "shares": 3 })), state.clone())
        .await
        .unwrap();
    let result = resp.result.unwrap();
    assert_eq!(result["isError"], true);
    assert_eq!(result["structuredContent"]["code"], "operation_failed");

    // The server keeps answering afterwards.
    let ping = handle_mcp_request(Request::new(json!(2), "ping", None), state).await.unwrap();
    assert!(!ping.is_error());
}

#[tokio::test]
async fn test_formatting_is_idempotent() {
    let (state, _provider) = test_state(StubProvider {
        balance: RawBalance {
            balance: Some("1.25".into()),
        },
        ..StubProvider::new()
    });

    let first = state.dispatcher.dispatch("getBalance", json!({})).await.unwrap();
    let second = state.dispatcher.dispatch("getBalance", json!({})).await.unwrap();

    assert_eq!(formatter::format(&first), formatter::format(&second));
}

#[test]
fn test_duplicate_tool_names_are_rejected() {
    let tools = native::tools().into_iter().chain(native::tools()).collect();
    let err = ToolRegistry::new(tools).err().unwrap();
    assert_eq!(err.to_string(), "tool 'getBalance' is registered more than once");

    let unique = native::tools().into_iter().chain(erc20::tools()).collect();
    assert_eq!(ToolRegistry::new(unique).unwrap().len(), 7);
}

#[test]
fn test_standard_registry_lists_every_tool() {
    let registry = ToolRegistry::standard().unwrap();
    let names: Vec<&str> = registry.descriptors().map(|d| d.name).collect();
    assert_eq!(names.len(), 19);
    for name in ["getBalance", "registerENSDomain", "swapOnKuru", "createCurveWithMetadata", "searchTokens"] {
        assert!(names.contains(&name), "{} missing", name);
    }
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let (state, _provider) = test_state(StubProvider::new());
    let req = Request::new(Value::Null, "notifications/initialized", None);
    assert!(handle_mcp_request(req, state).await.is_none());
}

#[tokio::test]
async fn test_domain_price_defaults_to_one_year() {
    let (state, provider) = test_state(StubProvider {
        domain_price: RawDomainPrice {
            success: true,
            price: Some("1.5".into()),
            error: None,
        },
        ..StubProvider::new()
    });

    let resp = handle_mcp_request(call("getENSDomainPrice", json!({ "name": "alice" })), state)
        .await
        .unwrap();

    let result = resp.result.unwrap();
    assert_eq!(result_text(&result), "DOMAIN PRICE\nName: alice\nDuration: 365 days\nPrice: 1.5");
    assert_eq!(result["structuredContent"]["duration"], 365);
    assert_eq!(provider.log(), vec!["ens_domain_price alice 365".to_string()]);
}

#[tokio::test]
async fn test_unresolved_names_are_not_found() {
    let (state, _provider) = test_state(StubProvider::new());

    let resolve = state.dispatcher.dispatch("resolveENSName", json!({ "name": "ghost.nad" })).await;
    let resolve = resolve.unwrap_err();
    let fault = resolve.app_fault().unwrap();
    assert_eq!(fault.code, FaultCode::EnsNameNotFound);
    assert_eq!(fault.status, 404);

    let profile = state.dispatcher.dispatch("getENSProfile", json!({ "name": "ghost.nad" })).await;
    let profile = profile.unwrap_err();
    let fault = profile.app_fault().unwrap();
    assert_eq!(fault.code, FaultCode::EnsProfileNotFound);
    assert_eq!(fault.status, 404);
}

#[tokio::test]
async fn test_curve_below_minimum_buy_skips_image_download() {
    let (state, provider) = test_state(StubProvider::new());

    let outcome = state.dispatcher.dispatch("createCurveWithMetadata", curve_args("0.1")).await;

    assert_eq!(outcome.unwrap_err().app_fault().unwrap().code, FaultCode::InvalidAmount);
    assert_eq!(provider.calls_to("fetch_image"), 0);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_curve_rejects_non_image_content() {
    let (state, provider) = test_state(StubProvider {
        image: RemoteImage {
            bytes: b"<html></html>".to_vec(),
            content_type: Some("text/html".into()),
        },
        ..StubProvider::new()
    });

    let outcome = state.dispatcher.dispatch("createCurveWithMetadata", curve_args("1")).await;

    assert_eq!(outcome.unwrap_err().app_fault().unwrap().code, FaultCode::InvalidImage);
    assert_eq!(provider.calls_to("fetch_image"), 1);
    assert_eq!(provider.calls_to("create_curve"), 0);
}

#[tokio::test]
async fn test_curve_with_image_is_created() {
    let (state, provider) = test_state(StubProvider {
        image: RemoteImage {
            bytes: vec![0x89, b'P', b'N', b'G'],
            content_type: Some("image/png".into()),
        },
        ..StubProvider::new()
    });

    state
        .dispatcher
        .dispatch("createCurveWithMetadata", curve_args("0.5"))
        .await
        .unwrap();

    assert_eq!(provider.calls_to("create_curve"), 1);
}

#[tokio::test]
async fn test_swap_from_native_token_skips_approval() {
    let (state, provider) = test_state(StubProvider {
        token_search: directory(true, 2),
        ..StubProvider::new()
    });
    let args = json!({
        "tokenInAddress": "0x0000000000000000000000000000000000000000",
        "tokenOutAddress": "0xb",
        "amountToSwap": 1,
        "slippageTolerance": 1,
    });

    state.dispatcher.dispatch("swapOnKuru", args).await.unwrap();

    let swap = provider.log().into_iter().find(|e| e.starts_with("dex_swap")).unwrap();
    assert_eq!(
        swap,
        "dex_swap 0x0000000000000000000000000000000000000000 0xb 1 1 decimals=18/6 approve=false"
    );
}

#[tokio::test]
async fn test_swap_ignores_failed_directory_payload() {
    let (state, provider) = test_state(StubProvider {
        token_search: directory(false, 2),
        ..StubProvider::new()
    });
    let args = json!({
        "tokenInAddress": "0xb",
        "tokenOutAddress": "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701",
        "amountToSwap": 3,
    });

    state.dispatcher.dispatch("swapOnKuru", args).await.unwrap();

    let swap = provider.log().into_iter().find(|e| e.starts_with("dex_swap")).unwrap();
    assert!(swap.ends_with("decimals=18/18 approve=true"), "{}", swap);
}

#[tokio::test]
async fn test_search_reports_directory_total() {
    let (state, provider) = test_state(StubProvider {
        token_search: directory(true, 57),
        ..StubProvider::new()
    });

    let output = state
        .dispatcher
        .invoke("searchTokens", json!({ "query": "usd" }))
        .await
        .unwrap();

    assert!(!output.is_error);
    assert!(output.text().starts_with("Found 57 tokens matching \"usd\":\n\n1. USD Coin (USDC)"));
    assert!(output.text().contains("2. Wrapped MON (WMON)"));
    let structured = output.structured_content.unwrap();
    assert_eq!(structured["total"], 57);
    assert_eq!(structured["tokens"].as_array().unwrap().len(), 2);
    assert_eq!(provider.log(), vec!["search_tokens usd 20".to_string()]);
}

#[tokio::test]
async fn test_invoke_renders_faults_and_passes_protocol_errors() {
    let (state, _provider) = test_state(StubProvider::failing());

    let output = state.dispatcher.invoke("stake", json!({ "amount": 2 })).await.unwrap();
    assert!(output.is_error);
    assert!(output.text().starts_with("Monad blockchain error: Failed to stake tokens"));

    let unknown = state.dispatcher.invoke("mint", json!({})).await.unwrap_err();
    assert_eq!(unknown, ProtocolFault::UnknownTool("mint".into()));
}
