// src/tools/token.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SearchArgs {
    #[validate(length(min = 1, message = "Search query is required"))]
    pub query: String,
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![Tool::new(
        ToolDescriptor::new(
            "searchTokens",
            "Search for tokens by name or ticker symbol on Monad",
            vec![ParamSpec::string("query", "Search query (token name or ticker)").required()],
        ),
        |client, args: SearchArgs| {
            async move { client.search_tokens(&args.query).await.map(OperationResult::from) }.boxed()
        },
    )
    .boxed()]
}
