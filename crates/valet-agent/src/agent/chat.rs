//! The chat turn loop.

use tracing::debug;

use crate::error::{AgentError, GatewayError};

use super::manager::Agent;
use super::types::BusyGuard;

impl Agent {
    /// Add a user message and drive the turn to a final reply.
    ///
    /// The loop solicits the model with the full transcript and the tool
    /// schema list, executes at most one tool call per round, and
    /// terminates on the first plain-text reply. Tool-level failures are
    /// folded back into the conversation as tool output so the model can
    /// recover; gateway failures abort the call. Exceeding the round
    /// budget fails with [`AgentError::TurnLimitExceeded`].
    pub async fn chat(&mut self, user_message: impl Into<String>) -> Result<String, AgentError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.transcript.append_user(user_message.into());

        let schemas = self.registry.schemas();
        let mut rounds = 0u32;

        loop {
            let reply = self
                .gateway
                .send(&self.build_messages(), &schemas)
                .await?;
            self.tracker.record(&reply.usage);

            // An unclassifiable reply is a provider fault, not a
            // conversational event. Nothing is appended for it.
            if reply.content.is_none() && reply.tool_call.is_none() {
                return Err(GatewayError::EmptyReply.into());
            }

            self.transcript
                .append_assistant(reply.content.clone(), reply.tool_call.clone());

            let Some(call) = reply.tool_call else {
                // Plain text — the final reply.
                return Ok(reply.content.unwrap_or_default());
            };

            rounds += 1;
            if rounds > self.max_tool_rounds {
                return Err(AgentError::TurnLimitExceeded(self.max_tool_rounds));
            }

            debug!(round = rounds, tool = %call.name, "model requested a tool call");
            let output = match self.registry.invoke(&call.name, &call.arguments) {
                Ok(output) => output,
                Err(err) => {
                    debug!(tool = %call.name, error = %err, "tool call failed, surfacing to model");
                    format!("error: {err}")
                }
            };

            self.transcript.append_tool_result(call.name, output);
        }
    }
}
