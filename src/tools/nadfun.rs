// src/tools/nadfun.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::client::CurveParams;
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCurveArgs {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Symbol is required"))]
    pub symbol: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,
    #[validate(length(min = 1, message = "Amount is required"))]
    pub amount_in: String,
    pub home_page: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
}

impl From<CreateCurveArgs> for CurveParams {
    fn from(args: CreateCurveArgs) -> Self {
        CurveParams {
            name: args.name,
            symbol: args.symbol,
            description: args.description,
            image_url: args.image_url,
            amount_in: args.amount_in,
            home_page: args.home_page,
            twitter: args.twitter,
            telegram: args.telegram,
        }
    }
}

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![Tool::new(
        ToolDescriptor::new(
            "createCurveWithMetadata",
            "Create a new meme token using nadfun protocol",
            vec![
                ParamSpec::string("name", "Name of the token").required(),
                ParamSpec::string("symbol", "Symbol of the token").required(),
                ParamSpec::string("description", "Description of the token").required(),
                ParamSpec::string("imageUrl", "URL of the image for the token").required(),
                ParamSpec::string(
                    "amountIn",
                    "Amount of ETH to invest (e.g., \"0.5\"). Minimum required amount is 0.5 ETH.",
                )
                .required(),
                ParamSpec::string("homePage", "Optional home page URL"),
                ParamSpec::string("twitter", "Optional Twitter URL"),
                ParamSpec::string("telegram", "Optional Telegram URL"),
            ],
        ),
        |client, args: CreateCurveArgs| {
            async move {
                client
                    .create_curve_with_metadata(args.into())
                    .await
                    .map(OperationResult::from)
            }
            .boxed()
        },
    )
    .boxed()]
}
