use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Tool, ToolError};

/// Simulated arithmetic tool.
///
/// Domain failures (division by zero, unsupported operator) are part of
/// the result payload's `error` field rather than execution errors, so
/// the model sees them as data.
pub struct CalculatorTool;

#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    a: f64,
    b: f64,
    operation: String,
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Perform basic arithmetic (+, -, *, /) on two numbers."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {"type": "number", "description": "First operand"},
                "b": {"type": "number", "description": "Second operand"},
                "operation": {
                    "type": "string",
                    "enum": ["+", "-", "*", "/"],
                    "description": "Arithmetic operation to apply"
                }
            },
            "required": ["a", "b", "operation"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let args: CalculatorArgs = serde_json::from_value(args)
            .map_err(|error| ToolError::InvalidArguments(error.to_string()))?;

        let (result, error) = match args.operation.as_str() {
            "+" => (Some(args.a + args.b), None),
            "-" => (Some(args.a - args.b), None),
            "*" => (Some(args.a * args.b), None),
            "/" if args.b == 0.0 => (None, Some("Division by zero".to_string())),
            "/" => (Some(args.a / args.b), None),
            other => (None, Some(format!("Unsupported operation: {other}"))),
        };

        Ok(json!({
            "a": args.a,
            "b": args.b,
            "operation": args.operation,
            "result": result,
            "error": error,
        }))
    }
}
