//! Anthropic Claude gateway.

mod client;
mod config;

pub use client::ClaudeGateway;
pub use config::ClaudeConfig;
