//! Demonstration tools registered by the REPL.

use std::sync::Arc;

use serde_json::{json, Value};
use valet_agent::error::ToolError;
use valet_agent::Tool;

/// Tools offered to the model in the REPL.
pub fn demo_tools() -> Vec<Arc<dyn Tool>> {
    vec![Arc::new(Add), Arc::new(Multiply), Arc::new(CurrentTime)]
}

fn number(args: &serde_json::Map<String, Value>, key: &str) -> Result<f64, ToolError> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("'{key}' is not a number").into())
}

fn number_value(result: f64) -> Value {
    // Integral results render without a trailing ".0".
    if result.fract() == 0.0 && result.abs() < i64::MAX as f64 {
        json!(result as i64)
    } else {
        json!(result)
    }
}

fn binary_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "a": { "type": "number", "description": "First operand" },
            "b": { "type": "number", "description": "Second operand" }
        },
        "required": ["a", "b"]
    })
}

pub struct Add;

impl Tool for Add {
    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers and return the sum."
    }

    fn parameters(&self) -> Value {
        binary_schema()
    }

    fn call(&self, args: &serde_json::Map<String, Value>) -> Result<Value, ToolError> {
        Ok(number_value(number(args, "a")? + number(args, "b")?))
    }
}

pub struct Multiply;

impl Tool for Multiply {
    fn name(&self) -> &str {
        "multiply"
    }

    fn description(&self) -> &str {
        "Multiply two numbers and return the product."
    }

    fn parameters(&self) -> Value {
        binary_schema()
    }

    fn call(&self, args: &serde_json::Map<String, Value>) -> Result<Value, ToolError> {
        Ok(number_value(number(args, "a")? * number(args, "b")?))
    }
}

pub struct CurrentTime;

impl Tool for CurrentTime {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current local date and time."
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn call(&self, _args: &serde_json::Map<String, Value>) -> Result<Value, ToolError> {
        Ok(json!(chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(payload: Value) -> serde_json::Map<String, Value> {
        payload.as_object().unwrap().clone()
    }

    #[test]
    fn add_sums_operands() {
        let result = Add.call(&args(json!({ "a": 2, "b": 40 }))).unwrap();
        assert_eq!(result, json!(42));
    }

    #[test]
    fn multiply_matches_reference_product() {
        let result = Multiply
            .call(&args(json!({ "a": 2123, "b": 215123 })))
            .unwrap();
        assert_eq!(result, json!(456706129));
    }

    #[test]
    fn fractional_results_stay_fractional() {
        let result = Multiply.call(&args(json!({ "a": 0.5, "b": 3 }))).unwrap();
        assert_eq!(result, json!(1.5));
    }

    #[test]
    fn non_numeric_operand_is_an_error() {
        let result = Add.call(&args(json!({ "a": "two", "b": 40 })));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'a'"));
    }

    #[test]
    fn demo_tool_names_are_unique() {
        let tools = demo_tools();
        let mut names: Vec<_> = tools.iter().map(|t| t.name().to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }
}
