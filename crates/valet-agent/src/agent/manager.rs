//! Agent struct, construction, and conversation accessors.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::AgentError;
use crate::tools::{Tool, ToolRegistry};
use crate::transcript::Transcript;
use crate::usage::UsageTracker;
use crate::{LlmGateway, Message};

/// A conversational agent: transcript, tool registry, and the gateway it
/// consults. One logical thread of control; `chat` is not reentrant.
pub struct Agent {
    /// Provider seam, consulted once per model turn.
    pub(super) gateway: Arc<dyn LlmGateway>,
    /// Registered tools, immutable after construction.
    pub(super) registry: ToolRegistry,
    /// Conversation history, exclusively owned.
    pub(super) transcript: Transcript,
    /// System prompt prepended to every gateway request.
    pub(super) system_prompt: Option<String>,
    /// Maximum tool-call rounds per chat call.
    pub(super) max_tool_rounds: u32,
    /// Token usage tracker.
    pub(super) tracker: UsageTracker,
    /// Whether a chat call is currently in flight.
    pub(super) busy: AtomicBool,
}

impl Agent {
    /// Build an agent over the given gateway and tools. Fails with
    /// [`AgentError::DuplicateToolName`] if two tools share a name.
    pub fn new(
        gateway: Arc<dyn LlmGateway>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            gateway,
            registry: ToolRegistry::new(tools)?,
            transcript: Transcript::new(),
            system_prompt: None,
            max_tool_rounds: 10,
            tracker: UsageTracker::new(),
            busy: AtomicBool::new(false),
        })
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    /// Seed the conversation with prior history.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    /// Request messages for the gateway: system prompt first, then the
    /// transcript in insertion order.
    pub(super) fn build_messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        if let Some(ref system) = self.system_prompt {
            messages.push(Message::system(system.clone()));
        }
        messages.extend(self.transcript.messages().iter().cloned());
        messages
    }

    /// The full conversation history.
    pub fn transcript(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Number of messages in the history.
    pub fn message_count(&self) -> usize {
        self.transcript.len()
    }

    /// The registered tools' registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Cumulative token usage.
    pub fn tracker(&self) -> &UsageTracker {
        &self.tracker
    }

    /// Discard the conversation history. Safe to call in any state; the
    /// next chat starts from empty.
    pub fn reset(&mut self) {
        self.transcript.reset();
    }
}
