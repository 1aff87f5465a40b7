//! Append-only conversation state.
//!
//! The transcript is owned by exactly one [`Agent`](crate::Agent); messages
//! are never mutated or removed individually. Only [`Transcript::reset`]
//! shrinks it, and it shrinks it to empty.

use crate::{Message, ToolCall};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Seed a transcript with prior history, e.g. a restored conversation.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message. `content` may be `None` when the
    /// message is purely a tool-call directive.
    pub fn append_assistant(&mut self, content: Option<String>, tool_call: Option<ToolCall>) {
        self.messages.push(Message::assistant(content, tool_call));
    }

    pub fn append_tool_result(&mut self, tool_name: impl Into<String>, content: impl Into<String>) {
        self.messages.push(Message::tool_result(tool_name, content));
    }

    /// Read-only view of the history in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Discard the entire history.
    pub fn reset(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn appends_preserve_order_and_shape() {
        let mut transcript = Transcript::new();
        transcript.append_user("what is 2 + 2?");
        transcript.append_assistant(
            None,
            Some(ToolCall {
                name: "add".into(),
                arguments: r#"{"a": 2, "b": 2}"#.into(),
            }),
        );
        transcript.append_tool_result("add", "4");
        transcript.append_assistant(Some("2 + 2 is 4.".into()), None);

        let messages = transcript.messages();
        assert_eq!(messages.len(), 4);

        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content.as_deref(), Some("what is 2 + 2?"));

        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.is_none());
        assert_eq!(messages[1].tool_call.as_ref().unwrap().name, "add");

        assert_eq!(messages[2].role, Role::Tool);
        assert_eq!(messages[2].tool_name.as_deref(), Some("add"));
        assert_eq!(messages[2].content.as_deref(), Some("4"));

        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[3].content.as_deref(), Some("2 + 2 is 4."));
        assert!(messages[3].tool_call.is_none());
    }

    #[test]
    fn reset_empties_the_history() {
        let mut transcript = Transcript::new();
        transcript.append_user("hello");
        transcript.append_assistant(Some("hi".into()), None);
        assert_eq!(transcript.len(), 2);

        transcript.reset();
        assert!(transcript.is_empty());
        assert!(transcript.messages().is_empty());
    }

    #[test]
    fn seeded_transcript_keeps_prior_history() {
        let transcript = Transcript::from_messages(vec![
            Message::user("earlier question"),
            Message::assistant(Some("earlier answer".into()), None),
        ]);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].role, Role::User);
    }
}
