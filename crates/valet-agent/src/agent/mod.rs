//! The conversational turn executor.
//!
//! An [`Agent`] owns the transcript and the tool registry, and drives the
//! bounded tool-call loop against an [`LlmGateway`](crate::LlmGateway).

mod chat;
mod manager;
mod types;

pub use manager::Agent;
