//! Anthropic Messages API client (https://api.anthropic.com/v1/messages).

use async_trait::async_trait;
use tracing::debug;

use crate::error::GatewayError;
use crate::{GatewayReply, LlmGateway, Message, Role, TokenUsage, ToolCall, ToolSchema};

use super::config::ClaudeConfig;

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// [`LlmGateway`] implementation for Claude models.
pub struct ClaudeGateway {
    config: ClaudeConfig,
    http: reqwest::Client,
}

impl ClaudeGateway {
    pub fn new(config: ClaudeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Build the JSON request body for the Messages API.
    ///
    /// Tool results ride as user-role text tagged with the tool name; a
    /// directive-only assistant message renders as a placeholder line so
    /// the wire history never carries an empty content block. The system
    /// message goes in the top-level `system` field.
    fn build_request_body(&self, messages: &[Message], tools: &[ToolSchema]) -> serde_json::Value {
        let mut msgs = Vec::new();
        for msg in messages {
            let (role, content) = match msg.role {
                Role::User => ("user", msg.content.clone().unwrap_or_default()),
                Role::Tool => {
                    let name = msg.tool_name.as_deref().unwrap_or("unknown");
                    let text = msg.content.as_deref().unwrap_or_default();
                    ("user", format!("[Tool Result: {name}]\n{text}"))
                }
                Role::Assistant => {
                    let content = match (&msg.content, &msg.tool_call) {
                        (Some(text), _) => text.clone(),
                        (None, Some(call)) => {
                            format!("[Tool Call: {}({})]", call.name, call.arguments)
                        }
                        (None, None) => String::new(),
                    };
                    ("assistant", content)
                }
                Role::System => continue, // system is separate in the Claude API
            };
            msgs.push(serde_json::json!({
                "role": role,
                "content": content,
            }));
        }

        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": msgs,
        });

        if let Some(system) = messages
            .iter()
            .find(|m| m.role == Role::System)
            .and_then(|m| m.content.as_deref())
        {
            body["system"] = serde_json::json!(system);
        }

        if !tools.is_empty() {
            let tool_defs: Vec<_> = tools
                .iter()
                .map(|tool| {
                    serde_json::json!({
                        "name": tool.name,
                        "description": tool.description,
                        "input_schema": tool.parameters,
                    })
                })
                .collect();
            body["tools"] = serde_json::json!(tool_defs);
        }

        body
    }

    /// Parse a Messages API response into a gateway reply.
    ///
    /// The first `text` block becomes the content, the first `tool_use`
    /// block becomes the directive (at most one per model turn). The
    /// `tool_use` input is re-serialized so the registry stays the single
    /// authority on payload parsing.
    fn parse_reply(&self, json: serde_json::Value) -> Result<GatewayReply, GatewayError> {
        let blocks = json["content"]
            .as_array()
            .ok_or_else(|| GatewayError::ParseError("missing content array".into()))?;

        let content = blocks.iter().find_map(|b| {
            if b["type"] == "text" {
                b["text"].as_str().map(String::from)
            } else {
                None
            }
        });

        let tool_call = blocks
            .iter()
            .find(|b| b["type"] == "tool_use")
            .map(|b| ToolCall {
                name: b["name"].as_str().unwrap_or_default().to_string(),
                arguments: b["input"].to_string(),
            });

        let usage = TokenUsage {
            input_tokens: json["usage"]["input_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["output_tokens"].as_u64().unwrap_or(0),
        };

        Ok(GatewayReply {
            content,
            tool_call,
            usage,
        })
    }
}

#[async_trait]
impl LlmGateway for ClaudeGateway {
    async fn send(
        &self,
        transcript: &[Message],
        tools: &[ToolSchema],
    ) -> Result<GatewayReply, GatewayError> {
        let body = self.build_request_body(transcript, tools);

        debug!(model = %self.config.model, messages = transcript.len(), "Claude API request");

        let response = self
            .http
            .post(CLAUDE_API_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::ParseError(e.to_string()))?;

        self.parse_reply(json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn gateway() -> ClaudeGateway {
        ClaudeGateway::new(ClaudeConfig::new("test-key").with_model("claude-test"))
    }

    fn schemas() -> Vec<ToolSchema> {
        vec![ToolSchema {
            name: "add".into(),
            description: "adds two numbers".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "a": { "type": "number" },
                    "b": { "type": "number" }
                },
                "required": ["a", "b"]
            }),
        }]
    }

    #[test]
    fn request_body_maps_roles_and_tools() {
        let messages = vec![
            Message::system("be brief"),
            Message::user("what is 1 + 2?"),
            Message::assistant(
                None,
                Some(ToolCall {
                    name: "add".into(),
                    arguments: r#"{"a":1,"b":2}"#.into(),
                }),
            ),
            Message::tool_result("add", "3"),
        ];

        let body = gateway().build_request_body(&messages, &schemas());

        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["system"], "be brief");

        let msgs = body["messages"].as_array().unwrap();
        // System is lifted out of the message list.
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[0]["role"], "user");
        assert_eq!(msgs[1]["role"], "assistant");
        assert!(msgs[1]["content"]
            .as_str()
            .unwrap()
            .contains("[Tool Call: add("));
        assert_eq!(msgs[2]["role"], "user");
        assert_eq!(msgs[2]["content"], "[Tool Result: add]\n3");

        let tools = body["tools"].as_array().unwrap();
        assert_eq!(tools[0]["name"], "add");
        assert_eq!(tools[0]["input_schema"]["required"][0], "a");
    }

    #[test]
    fn request_body_omits_tools_when_none_offered() {
        let messages = vec![Message::user("hi")];
        let body = gateway().build_request_body(&messages, &[]);
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn parses_text_reply() {
        let reply = gateway()
            .parse_reply(json!({
                "content": [
                    { "type": "text", "text": "Hello!" }
                ],
                "usage": { "input_tokens": 12, "output_tokens": 4 }
            }))
            .unwrap();

        assert_eq!(reply.content.as_deref(), Some("Hello!"));
        assert!(reply.tool_call.is_none());
        assert_eq!(reply.usage.input_tokens, 12);
        assert_eq!(reply.usage.output_tokens, 4);
    }

    #[test]
    fn parses_tool_use_reply() {
        let reply = gateway()
            .parse_reply(json!({
                "content": [
                    { "type": "tool_use", "id": "toolu_01", "name": "add",
                      "input": { "a": 1, "b": 2 } }
                ],
                "usage": { "input_tokens": 30, "output_tokens": 9 }
            }))
            .unwrap();

        assert!(reply.content.is_none());
        let call = reply.tool_call.unwrap();
        assert_eq!(call.name, "add");
        let parsed: serde_json::Value = serde_json::from_str(&call.arguments).unwrap();
        assert_eq!(parsed["a"], 1);
        assert_eq!(parsed["b"], 2);
    }

    #[test]
    fn missing_content_is_a_parse_error() {
        let result = gateway().parse_reply(json!({ "error": "nope" }));
        assert!(matches!(result, Err(GatewayError::ParseError(_))));
    }
}
