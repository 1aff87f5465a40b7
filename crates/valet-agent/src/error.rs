//! Error taxonomy for the agent core and the provider gateway.
//!
//! Tool-level failures are recoverable: the turn executor folds them back
//! into the conversation as tool output so the model can retry or answer
//! without the tool. Gateway failures abort the current chat call.

/// Error type tool entrypoints may return.
pub type ToolError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("malformed arguments for tool '{tool}': {reason}")]
    MalformedArguments { tool: String, reason: String },

    #[error("argument mismatch for tool '{tool}': {reason}")]
    ArgumentMismatch { tool: String, reason: String },

    #[error("tool '{tool}' failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: ToolError,
    },

    #[error("duplicate tool name: {0}")]
    DuplicateToolName(String),

    #[error("tool round limit of {0} exceeded")]
    TurnLimitExceeded(u32),

    #[error("chat already in progress")]
    ChatInProgress,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("rate limited")]
    RateLimited,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("timeout")]
    Timeout,

    #[error("reply carried neither text nor a tool call")]
    EmptyReply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_error_display() {
        let err = AgentError::UnknownTool("weather".into());
        assert_eq!(err.to_string(), "unknown tool: weather");

        let err = AgentError::MalformedArguments {
            tool: "add".into(),
            reason: "expected a JSON object".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed arguments for tool 'add': expected a JSON object"
        );

        let err = AgentError::ArgumentMismatch {
            tool: "add".into(),
            reason: "missing required argument 'b'".into(),
        };
        assert_eq!(
            err.to_string(),
            "argument mismatch for tool 'add': missing required argument 'b'"
        );

        let err = AgentError::DuplicateToolName("add".into());
        assert_eq!(err.to_string(), "duplicate tool name: add");

        let err = AgentError::TurnLimitExceeded(10);
        assert_eq!(err.to_string(), "tool round limit of 10 exceeded");

        let err = AgentError::ChatInProgress;
        assert_eq!(err.to_string(), "chat already in progress");
    }

    #[test]
    fn tool_execution_wraps_source() {
        let source: ToolError = "division by zero".into();
        let err = AgentError::ToolExecution {
            tool: "divide".into(),
            source,
        };
        assert_eq!(err.to_string(), "tool 'divide' failed: division by zero");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn agent_error_from_gateway() {
        let gateway_err = GatewayError::NetworkError("connection refused".into());
        let err: AgentError = gateway_err.into();
        assert!(matches!(err, AgentError::Gateway(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn gateway_error_display() {
        assert_eq!(GatewayError::RateLimited.to_string(), "rate limited");
        assert_eq!(GatewayError::Timeout.to_string(), "timeout");
        assert_eq!(
            GatewayError::ApiError("HTTP 500".into()).to_string(),
            "API error: HTTP 500"
        );
        assert_eq!(
            GatewayError::EmptyReply.to_string(),
            "reply carried neither text nor a tool call"
        );
    }
}
