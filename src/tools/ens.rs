// src/tools/ens.rs

use super::{schema::ParamSpec, Tool, ToolDescriptor, ToolHandler};
use crate::blockchain::models::OperationResult;
use futures::FutureExt;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct NameArgs {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddressArgs {
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DomainPriceArgs {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub duration: Option<u32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDomainArgs {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub tld: Option<String>,
    pub duration: Option<u32>,
}

const DURATION: ParamSpec =
    ParamSpec::integer("duration", "Registration duration in days (default: 365)").positive();

pub fn tools() -> Vec<Box<dyn ToolHandler>> {
    vec![
        Tool::new(
            ToolDescriptor::new(
                "getENSProfile",
                "Get the profile information for an ENS name",
                vec![ParamSpec::string("name", "The ENS name to look up").required()],
            ),
            |client, args: NameArgs| {
                async move { client.get_ens_profile(&args.name).await.map(OperationResult::from) }.boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "resolveENSName",
                "Resolve an ENS name to an Ethereum address",
                vec![ParamSpec::string("name", "The ENS name to resolve").required()],
            ),
            |client, args: NameArgs| {
                async move { client.resolve_ens_name(&args.name).await.map(OperationResult::from) }.boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "getPrimaryENSName",
                "Get the primary ENS name for an Ethereum address",
                vec![ParamSpec::string("address", "The Ethereum address to look up").required()],
            ),
            |client, args: AddressArgs| {
                async move {
                    client
                        .get_primary_ens_name(&args.address)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "getENSNames",
                "Get all ENS names owned by an address",
                vec![ParamSpec::string("address", "The Ethereum address to look up").required()],
            ),
            |client, args: AddressArgs| {
                async move { client.get_ens_names(&args.address).await.map(OperationResult::from) }.boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "getENSDomainPrice",
                "Get the price for registering an ENS domain",
                vec![
                    ParamSpec::string("name", "The domain name (without TLD)").required(),
                    DURATION,
                ],
            ),
            |client, args: DomainPriceArgs| {
                async move {
                    client
                        .get_ens_domain_price(&args.name, args.duration)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
        Tool::new(
            ToolDescriptor::new(
                "registerENSDomain",
                "Register/buy an ENS domain",
                vec![
                    ParamSpec::string("name", "The domain name to register (without TLD)").required(),
                    ParamSpec::string("tld", "The top-level domain (default: \"nad\")"),
                    DURATION,
                ],
            ),
            |client, args: RegisterDomainArgs| {
                async move {
                    client
                        .register_ens_domain(&args.name, args.tld.as_deref(), args.duration)
                        .await
                        .map(OperationResult::from)
                }
                .boxed()
            },
        )
        .boxed(),
    ]
}
