// src/tools/mod.rs

//! # Tools
//!
//! The dispatch table of the gateway. Each tool family module contributes a
//! list of [`ToolHandler`]s; [`ToolRegistry`] indexes them by name and
//! [`Dispatcher`] runs a call through lookup, argument validation and the
//! handler.
//!
//! ## Families
//! - `native`: getBalance, transferETH
//! - `erc20`: getTokenBalance, transferToken, approveToken, getTokenAllowance, getTokenInfo
//! - `ens`: getENSProfile, resolveENSName, getPrimaryENSName, getENSNames,
//!   getENSDomainPrice, registerENSDomain
//! - `kuru`: getKuruPrice, swapOnKuru
//! - `shmonad`: stake, unstake
//! - `nadfun`: createCurveWithMetadata
//! - `token`: searchTokens

pub mod ens;
pub mod erc20;
pub mod kuru;
pub mod nadfun;
pub mod native;
pub mod schema;
pub mod shmonad;
pub mod token;

use crate::blockchain::{models::OperationResult, MonadClient};
use crate::error::{AppFault, FaultCode, ProtocolFault, ToolError, Violation};
use crate::formatter;
use futures::future::BoxFuture;
use futures::FutureExt;
use schema::ParamSpec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use validator::Validate;

pub type ToolFuture = BoxFuture<'static, Result<OperationResult, AppFault>>;

/// What a tool advertises to clients.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &'static str, description: &'static str, params: Vec<ParamSpec>) -> Self {
        Self {
            name,
            description,
            params,
        }
    }

    /// Registry entry as listed by `tools/list`.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": schema::input_schema(&self.params),
        })
    }
}

/// A type-erased tool: validates raw arguments into a ready-to-run call.
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    /// Validates `args`. On success the returned future performs the
    /// operation; nothing reaches the provider until it is polled.
    fn prepare(&self, client: Arc<MonadClient>, args: Value) -> Result<ToolFuture, Vec<Violation>>;
}

/// A tool with typed arguments `A`.
pub struct Tool<A> {
    descriptor: ToolDescriptor,
    run: fn(Arc<MonadClient>, A) -> ToolFuture,
}

impl<A> Tool<A>
where
    A: DeserializeOwned + Validate + Send + 'static,
{
    pub fn new(descriptor: ToolDescriptor, run: fn(Arc<MonadClient>, A) -> ToolFuture) -> Self {
        Self { descriptor, run }
    }

    pub fn boxed(self) -> Box<dyn ToolHandler> {
        Box::new(self)
    }
}

impl<A> ToolHandler for Tool<A>
where
    A: DeserializeOwned + Validate + Send + 'static,
{
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn prepare(&self, client: Arc<MonadClient>, args: Value) -> Result<ToolFuture, Vec<Violation>> {
        let parsed: A = schema::parse(&self.descriptor.params, args)?;
        Ok((self.run)(client, parsed))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is registered more than once")]
    DuplicateTool(&'static str),
}

/// Name-indexed table of tools, in registration order.
pub struct ToolRegistry {
    tools: Vec<Box<dyn ToolHandler>>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// Builds a registry, failing on the first duplicated name.
    pub fn new(tools: Vec<Box<dyn ToolHandler>>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            let name = tool.descriptor().name;
            if index.insert(name, position).is_some() {
                return Err(RegistryError::DuplicateTool(name));
            }
        }
        Ok(Self { tools, index })
    }

    /// Every tool family shipped with the server.
    pub fn standard() -> Result<Self, RegistryError> {
        let tools = [
            native::tools(),
            erc20::tools(),
            ens::tools(),
            kuru::tools(),
            shmonad::tools(),
            nadfun::tools(),
            token::tools(),
        ]
        .into_iter()
        .flatten()
        .collect();
        Self::new(tools)
    }

    pub fn resolve(&self, name: &str) -> Option<&dyn ToolHandler> {
        self.index.get(name).map(|&i| self.tools[i].as_ref())
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Content item of a tool result envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

/// The `tools/call` result envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: Vec<TextContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

impl ToolOutput {
    pub fn success(result: &OperationResult) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: formatter::format(result),
                is_error: false,
            }],
            is_error: false,
            structured_content: serde_json::to_value(result).ok(),
        }
    }

    /// A recoverable failure the calling agent should read.
    pub fn failure(fault: &AppFault) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text",
                text: format!("Monad blockchain error: {}", fault.message),
                is_error: true,
            }],
            is_error: true,
            structured_content: Some(json!({ "code": fault.code, "status": fault.status })),
        }
    }

    /// First text item, which is the whole human-readable answer.
    pub fn text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or_default()
    }
}

/// Routes `(name, arguments)` to a tool and runs it.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    client: Arc<MonadClient>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, client: MonadClient) -> Self {
        Self {
            registry: Arc::new(registry),
            client: Arc::new(client),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn client(&self) -> &MonadClient {
        &self.client
    }

    /// Runs a tool and renders the result envelope. Application faults
    /// become `isError` output; only protocol faults are returned as errors.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<ToolOutput, ProtocolFault> {
        match self.dispatch(name, args).await {
            Ok(result) => Ok(ToolOutput::success(&result)),
            Err(ToolError::Application(fault)) => Ok(ToolOutput::failure(&fault)),
            Err(ToolError::Protocol(fault)) => Err(fault),
        }
    }

    /// Runs a tool and returns its typed result or the classified failure.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<OperationResult, ToolError> {
        let tool = self
            .registry
            .resolve(name)
            .ok_or_else(|| ProtocolFault::UnknownTool(name.to_string()))?;

        let call = tool
            .prepare(self.client.clone(), args)
            .map_err(ProtocolFault::InvalidParams)?;

        info!("Running tool {}", name);
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(fault)) => {
                info!("Tool {} failed with {}: {}", name, fault.code, fault.message);
                Err(fault.into())
            }
            Err(_) => {
                error!("Tool {} panicked", name);
                Err(AppFault::failed(
                    FaultCode::OperationFailed,
                    format!("An unexpected error occurred while running {}", name),
                )
                .into())
            }
        }
    }
}
