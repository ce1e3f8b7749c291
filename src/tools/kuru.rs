// src/tools/kuru.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use crate::blockchain::provider::AmountType;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

const TOKEN_IN: ParamSpec = ParamSpec::string("tokenInAddress", "Address of the input token").required();
const TOKEN_OUT: ParamSpec = ParamSpec::string("tokenOutAddress", "Address of the output token").required();

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PriceArgs {
    #[validate(length(min = 1, message = "Input token address is required"))]
    pub token_in_address: String,
    #[validate(length(min = 1, message = "Output token address is required"))]
    pub token_out_address: String,
    pub amount: f64,
    pub amount_type: Option<AmountType>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SwapArgs {
    #[validate(length(min = 1, message = "Input token address is required"))]
    pub token_in_address: String,
    #[validate(length(min = 1, message = "Output token address is required"))]
    pub token_out_address: String,
    pub amount_to_swap: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Slippage tolerance must be between 0 and 100"))]
    pub slippage_tolerance: Option<f64>,
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Tool::new(
            ToolDescriptor::new(
                "getKuruPrice",
                "Get the price for a token swap on Kuru DEX",
                vec![
                    TOKEN_IN,
                    TOKEN_OUT,
                    ParamSpec::number("amount", "Amount to swap").required().positive(),
                    ParamSpec::one_of(
                        "amountType",
                        &["amountIn", "amountOut"],
                        "Type of amount (default: amountIn)",
                    ),
                ],
            ),
            |client, args: PriceArgs| {
                async move {
                    client
                        .get_kuru_price(
                            &args.token_in_address,
                            &args.token_out_address,
                            args.amount,
                            args.amount_type,
                        )
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "swapOnKuru",
                "Swap tokens on Kuru DEX",
                vec![
                    TOKEN_IN,
                    TOKEN_OUT,
                    ParamSpec::number("amountToSwap", "Amount to swap").required().positive(),
                    ParamSpec::number(
                        "slippageTolerance",
                        "Slippage tolerance in percent (default: 0.5%)",
                    ),
                ],
            ),
            |client, args: SwapArgs| {
                async move {
                    client
                        .swap_on_kuru(
                            &args.token_in_address,
                            &args.token_out_address,
                            args.amount_to_swap,
                            args.slippage_tolerance,
                        )
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
    ]
}
