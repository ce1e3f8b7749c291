// src/blockchain/mod.rs

pub mod client;
pub use client::MonadClient;

pub mod evm_client;
pub use evm_client::EvmActionProvider;

pub mod models;
pub mod nonce_manager;
pub mod provider;
pub mod rpc;
pub mod services;
pub mod session;
pub mod transactions;

pub use provider::ActionProvider;
pub use session::Session;
