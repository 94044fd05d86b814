use serde_json::{json, Value};

use probe_core::ToolCall;

use crate::ToolRegistry;

/// Outcome of dispatching one model-issued tool call.
///
/// `content` is always a serialized JSON string: either the tool's
/// native result mapping or an object carrying an `error` field. It is
/// meant to become the content of a tool-role conversation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecution {
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
}

/// Decodes a tool call's arguments, runs the matching executor, and
/// serializes the result. Never returns an error to the caller: every
/// failure is folded into the payload so the model can see it and
/// recover in later turns.
///
/// `index` is the call's position in the assistant message, used to
/// synthesize a `call_<index>` id when the server omitted one.
pub async fn dispatch_tool_call(
    registry: &ToolRegistry,
    call: &ToolCall,
    index: usize,
) -> ToolExecution {
    let tool_call_id = call
        .id
        .clone()
        .unwrap_or_else(|| format!("call_{index}"));
    let name = call.function.name.clone();

    let payload = run_tool(registry, &name, &call.function.arguments).await;
    let content = serde_json::to_string(&payload)
        .unwrap_or_else(|_| r#"{"error":"Unserializable tool result"}"#.to_string());

    ToolExecution {
        tool_call_id,
        name,
        content,
    }
}

async fn run_tool(registry: &ToolRegistry, name: &str, raw_args: &Value) -> Value {
    let args = match decode_arguments(raw_args) {
        Ok(args) => args,
        Err(message) => {
            log::warn!("tool call {name}: {message}");
            return json!({ "error": message });
        }
    };

    let Some(tool) = registry.get(name) else {
        log::warn!("tool call for unregistered tool: {name}");
        return json!({ "error": format!("Unknown tool {name}") });
    };

    log::info!("executing tool: {name}({args})");
    match tool.execute(args).await {
        Ok(result) => result,
        Err(error) => json!({ "result": null, "error": error.to_string() }),
    }
}

/// Arguments arrive either as a native JSON object or as a JSON-encoded
/// string; anything else is rejected before the executor is reached.
fn decode_arguments(raw: &Value) -> Result<Value, String> {
    match raw {
        Value::Object(_) => Ok(raw.clone()),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|_| "Invalid JSON arguments".to_string())
        }
        Value::Null => Ok(json!({})),
        _ => Err("Unsupported arguments format".to_string()),
    }
}
