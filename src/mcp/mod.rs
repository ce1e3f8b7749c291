// src/mcp/mod.rs
pub mod handler;
pub mod normalize;
pub mod protocol;
