// src/tools/shmonad.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct StakeArgs {
    pub amount: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UnstakeArgs {
    pub shares: f64,
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Tool::new(
            ToolDescriptor::new(
                "stake",
                "Stake native tokens (MON) in the Shmonad staking contract",
                vec![ParamSpec::number("amount", "Amount of MON to stake").required().positive()],
            ),
            |client, args: StakeArgs| {
                async move { client.stake(args.amount).await.map(OperationResult::Stake) }.boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "unstake",
                "Unstake tokens from the Shmonad staking contract",
                vec![ParamSpec::number("shares", "Number of shares to unstake").required().positive()],
            ),
            |client, args: UnstakeArgs| {
                async move { client.unstake(args.shares).await.map(OperationResult::Unstake) }.boxed()
            },
        )
        .boxed(),
    ]
}
