// src/mcp/normalize.rs

//! # Error Normalizer
//!
//! Maps the outcome of a tool call onto the wire:
//!
//! | Outcome | JSON-RPC |
//! |---|---|
//! | success | `result` with the formatted text |
//! | application fault | `result` with `isError: true` and the fault message |
//! | unknown tool | error `-32601` |
//! | invalid arguments | error `-32602`, violations in `data` |
//! | anything unclassified | error `-32603`, fixed message |

use super::protocol::{error_codes, Response};
use crate::error::ProtocolFault;
use crate::tools::ToolOutput;
use serde_json::{json, Value};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

pub fn tool_call_response(id: Value, outcome: Result<ToolOutput, ProtocolFault>) -> Response {
    match outcome {
        Ok(output) => output_response(id, output),
        Err(fault) => protocol_fault(id, fault),
    }
}

pub fn protocol_fault(id: Value, fault: ProtocolFault) -> Response {
    match fault {
        ProtocolFault::UnknownTool(_) => {
            Response::error(id, error_codes::METHOD_NOT_FOUND, fault.to_string())
        }
        ProtocolFault::InvalidParams(ref violations) => Response::error_with_data(
            id,
            error_codes::INVALID_PARAMS,
            fault.to_string(),
            json!({ "violations": violations }),
        ),
    }
}

/// Generic reply for failures nobody classified. Details stay in the logs.
pub fn internal_error(id: Value) -> Response {
    Response::error(id, error_codes::INTERNAL_ERROR, UNEXPECTED_ERROR)
}

fn output_response(id: Value, output: ToolOutput) -> Response {
    match serde_json::to_value(&output) {
        Ok(result) => Response::success(id, result),
        Err(e) => {
            tracing::error!("Failed to serialize tool output: {}", e);
            internal_error(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::models::{BalanceResponse, OperationResult};
    use crate::error::{AppFault, FaultCode, Violation};

    #[test]
    fn test_success_carries_text_and_structured_content() {
        let resp = tool_call_response(
            json!(1),
            Ok(ToolOutput::success(&OperationResult::Balance(BalanceResponse {
                address: "0xabc".into(),
                balance: "5".into(),
            }))),
        );
        let result = resp.result.unwrap();
        assert_eq!(result["content"][0]["type"], "text");
        assert_eq!(result["content"][0]["text"], "Address: 0xabc\nBalance: 5 ETH");
        assert_eq!(result["structuredContent"]["balance"], "5");
        assert!(result.get("isError").is_none());
    }

    #[test]
    fn test_application_fault_is_a_successful_response() {
        let fault = AppFault::failed(FaultCode::TokenTransferFailed, "insufficient balance");
        let resp = tool_call_response(json!(2), Ok(ToolOutput::failure(&fault)));
        assert!(!resp.is_error());
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["isError"], true);
        assert_eq!(result["content"][0]["text"], "Monad blockchain error: insufficient balance");
        assert_eq!(result["structuredContent"]["code"], "token_transfer_failed");
    }

    #[test]
    fn test_protocol_faults_map_to_rpc_errors() {
        let unknown = tool_call_response(json!(3), Err(ProtocolFault::UnknownTool("nope".into())));
        assert_eq!(unknown.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

        let invalid = protocol_fault(
            json!(4),
            ProtocolFault::InvalidParams(vec![Violation::new("to", "is required")]),
        );
        let err = invalid.error.unwrap();
        assert_eq!(err.code, error_codes::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["violations"][0]["field"], "to");
    }
}
