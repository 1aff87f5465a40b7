//! Tool-augmented chat agent for Valet.
//!
//! Provides the conversational turn loop with:
//! - A tool registry the model can call into mid-conversation
//! - An append-only conversation transcript
//! - A bounded tool-call loop with typed failure modes
//! - An Anthropic Messages API gateway behind a provider-neutral trait

pub mod agent;
pub mod claude;
pub mod error;
pub mod tools;
pub mod transcript;
pub mod usage;

use async_trait::async_trait;

pub use agent::Agent;
pub use claude::{ClaudeConfig, ClaudeGateway};
pub use error::{AgentError, GatewayError};
pub use tools::{Tool, ToolRegistry};
pub use transcript::Transcript;
pub use usage::UsageTracker;

/// Provider seam: one request/response call against the model.
///
/// Implementations are stateless with respect to the conversation — the
/// full transcript is passed on every call.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn send(
        &self,
        transcript: &[Message],
        tools: &[ToolSchema],
    ) -> Result<GatewayReply, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    /// Textual content. `None` only for an assistant message that is
    /// purely a tool-call directive.
    pub content: Option<String>,
    /// Tool-call directive. Only an assistant message carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCall>,
    /// Originating tool name. Only a tool-result message carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_call: None,
            tool_name: None,
        }
    }

    pub fn assistant(content: Option<String>, tool_call: Option<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_call,
            tool_name: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_call: None,
            tool_name: None,
        }
    }

    pub fn tool_result(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_call: None,
            tool_name: Some(tool_name.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
}

/// The model's request to invoke a specific tool.
///
/// `arguments` is the raw JSON payload text exactly as the provider
/// produced it; parsing it is the registry's job, so a malformed payload
/// is diagnosed in one place.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
}

/// Provider-facing descriptor for one registered tool.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One model response: plain text, a tool-call directive, or both.
/// At most one directive per model turn.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub content: Option<String>,
    pub tool_call: Option<ToolCall>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
