// src/tools/native.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct GetBalanceArgs {
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TransferEthArgs {
    #[validate(length(min = 1, message = "Recipient address is required"))]
    pub to: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount: String,
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Tool::new(
            ToolDescriptor::new(
                "getBalance",
                "Get the balance of a Monad wallet address",
                vec![ParamSpec::string(
                    "address",
                    "Ethereum address to check balance for. If omitted, uses your wallet address.",
                )],
            ),
            |client, args: GetBalanceArgs| {
                async move {
                    client
                        .get_balance(args.address.as_deref())
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "transferETH",
                "Transfer ETH to another address on Monad",
                vec![
                    ParamSpec::string("to", "Recipient Ethereum address").required(),
                    ParamSpec::string("amount", "Amount to transfer in ETH").required(),
                ],
            ),
            |client, args: TransferEthArgs| {
                async move {
                    client
                        .transfer_eth(&args.to, &args.amount)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
    ]
}
