use serde::{Deserialize, Serialize};

use crate::tools::ToolCall;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// One entry in the conversation sent to (and received from) the chat
/// endpoint. Message order is semantically significant: tool-role
/// messages must stay in the order their tool calls were issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    /// Only present on assistant messages that request tool invocations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Only present on tool-role messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Name of the tool that produced a tool-role message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn assistant(content: impl Into<String>, tool_calls: Option<Vec<ToolCall>>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn tool_result(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            name: Some(name.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::system("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "system");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let value = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("tool_calls"));
        assert!(!object.contains_key("tool_call_id"));
        assert!(!object.contains_key("name"));
    }

    #[test]
    fn tool_result_carries_id_and_name() {
        let msg = ChatMessage::tool_result("call_0", "calculator", "{\"result\":4}");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_0");
        assert_eq!(value["name"], "calculator");
    }

    #[test]
    fn deserializes_assistant_message_with_tool_calls() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "role": "assistant",
            "content": "",
            "tool_calls": [
                {"function": {"name": "get_weather", "arguments": {"city": "Istanbul"}}}
            ]
        }))
        .unwrap();

        let calls = msg.tool_calls.unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "get_weather");
        assert!(calls[0].id.is_none());
    }
}
