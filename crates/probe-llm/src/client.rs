use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use probe_core::{ChatMessage, ToolSchema};

use crate::{LlmError, Result};

/// Upper bound on a single chat exchange. Local models can take a long
/// time to load and generate, so this is deliberately generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(240);

/// Body of a `/api/chat` request. Optional fields are omitted from the
/// wire entirely when unset; streaming is always disabled.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
    /// Structured-output constraint; an opaque JSON-Schema-shaped
    /// document passed straight through to the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
            tool_choice: None,
            format: None,
            options: None,
            stream: false,
        }
    }

    /// Attaches tool definitions and lets the model decide whether to
    /// use them.
    pub fn with_tools(mut self, tools: Vec<ToolSchema>) -> Self {
        self.tools = Some(tools);
        self.tool_choice = Some("auto".to_string());
        self
    }

    pub fn with_format(mut self, schema: Value) -> Self {
        self.format = Some(schema);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.options = Some(json!({ "temperature": temperature }));
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Thin client for an Ollama-compatible chat endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One synchronous request/response exchange. Non-success statuses
    /// are turned into `LlmError::Api` with the body captured.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        log::debug!(
            "POST {url} model={} messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}
