//! Token usage accounting across gateway calls.

use crate::TokenUsage;

/// Tracks cumulative provider-reported token usage for one agent.
#[derive(Debug, Default)]
pub struct UsageTracker {
    total: TokenUsage,
    call_count: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record usage from one gateway call.
    pub fn record(&mut self, usage: &TokenUsage) {
        self.total.input_tokens += usage.input_tokens;
        self.total.output_tokens += usage.output_tokens;
        self.call_count += 1;
    }

    pub fn total(&self) -> &TokenUsage {
        &self.total
    }

    pub fn total_tokens(&self) -> u64 {
        self.total.total_tokens()
    }

    /// Number of gateway calls recorded.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Reset all counters. Independent of the conversation transcript.
    pub fn reset(&mut self) {
        self.total = TokenUsage::default();
        self.call_count = 0;
    }
}
