// src/tools/erc20.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

const TOKEN_ADDRESS: ParamSpec =
    ParamSpec::string("tokenAddress", "Address of the ERC20 token contract").required();

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalanceArgs {
    #[validate(length(min = 1, message = "Token address is required"))]
    pub token_address: String,
    pub owner_address: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferTokenArgs {
    #[validate(length(min = 1, message = "Token address is required"))]
    pub token_address: String,
    #[validate(length(min = 1, message = "Recipient address is required"))]
    pub to: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApproveTokenArgs {
    #[validate(length(min = 1, message = "Token address is required"))]
    pub token_address: String,
    #[validate(length(min = 1, message = "Spender address is required"))]
    pub spender: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllowanceArgs {
    #[validate(length(min = 1, message = "Token address is required"))]
    pub token_address: String,
    #[validate(length(min = 1, message = "Owner address is required"))]
    pub owner_address: String,
    #[validate(length(min = 1, message = "Spender address is required"))]
    pub spender_address: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfoArgs {
    #[validate(length(min = 1, message = "Token address is required"))]
    pub token_address: String,
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Tool::new(
            ToolDescriptor::new(
                "getTokenBalance",
                "Get the balance of an ERC20 token",
                vec![
                    TOKEN_ADDRESS,
                    ParamSpec::string(
                        "ownerAddress",
                        "Address to check balance for. If omitted, uses your wallet address.",
                    ),
                ],
            ),
            |client, args: TokenBalanceArgs| {
                async move {
                    client
                        .get_token_balance(&args.token_address, args.owner_address.as_deref())
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "transferToken",
                "Transfer ERC20 tokens to another address",
                vec![
                    TOKEN_ADDRESS,
                    ParamSpec::string("to", "Recipient address").required(),
                    ParamSpec::string("amount", "Amount of tokens to transfer").required(),
                ],
            ),
            |client, args: TransferTokenArgs| {
                async move {
                    client
                        .transfer_token(&args.token_address, &args.to, &args.amount)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "approveToken",
                "Approve a spender to use your ERC20 tokens",
                vec![
                    TOKEN_ADDRESS,
                    ParamSpec::string("spender", "Address of the spender to approve").required(),
                    ParamSpec::string("amount", "Amount of tokens to approve").required(),
                ],
            ),
            |client, args: ApproveTokenArgs| {
                async move {
                    client
                        .approve_token(&args.token_address, &args.spender, &args.amount)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "getTokenAllowance",
                "Get the approved allowance for a spender",
                vec![
                    TOKEN_ADDRESS,
                    ParamSpec::string("ownerAddress", "Address of the token owner").required(),
                    ParamSpec::string("spenderAddress", "Address of the spender").required(),
                ],
            ),
            |client, args: TokenAllowanceArgs| {
                async move {
                    client
                        .get_token_allowance(&args.token_address, &args.owner_address, &args.spender_address)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "getTokenInfo",
                "Get information about an ERC20 token",
                vec![TOKEN_ADDRESS],
            ),
            |client, args: TokenInfoArgs| {
                async move {
                    client
                        .get_token_info(&args.token_address)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
    ]
}
