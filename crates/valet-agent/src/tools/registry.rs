//! Tool trait and the name-indexed registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{AgentError, ToolError};
use crate::ToolSchema;

/// An externally defined callable the model may invoke.
///
/// The parameter schema is explicit and attached at registration; nothing
/// is introspected from the entrypoint. Execution is synchronous — tools
/// that need I/O block the turn, which is the intended model.
pub trait Tool: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Human-readable description offered to the model.
    fn description(&self) -> &str;

    /// JSON-schema object describing the keyword parameters
    /// (`{"type": "object", "properties": {...}, "required": [...]}`).
    fn parameters(&self) -> Value;

    /// Execute with parsed keyword bindings.
    fn call(&self, args: &serde_json::Map<String, Value>) -> Result<Value, ToolError>;
}

/// Name → tool mapping, built once at agent construction and read-only
/// during conversation. Registration order is preserved for the schema
/// list offered to the provider.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build the registry. Fails with [`AgentError::DuplicateToolName`]
    /// when two tools share a name.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, AgentError> {
        let mut by_name = HashMap::with_capacity(tools.len());
        for (index, tool) in tools.iter().enumerate() {
            if by_name.insert(tool.name().to_string(), index).is_some() {
                return Err(AgentError::DuplicateToolName(tool.name().to_string()));
            }
        }
        Ok(Self { tools, by_name })
    }

    /// Provider-facing descriptors in registration order. Pure.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters(),
            })
            .collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Tool>, AgentError> {
        self.by_name
            .get(name)
            .map(|&index| &self.tools[index])
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))
    }

    /// Parse the raw argument payload, validate it against the tool's
    /// schema, execute, and stringify the result.
    ///
    /// The string conversion is lossy by design — tool output is always
    /// surfaced to the model as text.
    pub fn invoke(&self, name: &str, raw_arguments: &str) -> Result<String, AgentError> {
        let tool = self.get(name)?;

        let args: serde_json::Map<String, Value> = serde_json::from_str(raw_arguments)
            .map_err(|e| AgentError::MalformedArguments {
                tool: name.to_string(),
                reason: format!("expected a JSON object: {e}"),
            })?;

        validate_bindings(name, &tool.parameters(), &args)?;

        debug!(tool = %name, "executing tool");
        let output = tool
            .call(&args)
            .map_err(|source| AgentError::ToolExecution {
                tool: name.to_string(),
                source,
            })?;

        Ok(stringify(output))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Check the parsed bindings against the declared schema: every required
/// key must be present, every provided key must be a declared property.
fn validate_bindings(
    name: &str,
    schema: &Value,
    args: &serde_json::Map<String, Value>,
) -> Result<(), AgentError> {
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(key) {
                return Err(AgentError::ArgumentMismatch {
                    tool: name.to_string(),
                    reason: format!("missing required argument '{key}'"),
                });
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for key in args.keys() {
            if !properties.contains_key(key) {
                return Err(AgentError::ArgumentMismatch {
                    tool: name.to_string(),
                    reason: format!("unexpected argument '{key}'"),
                });
            }
        }
    }

    Ok(())
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
