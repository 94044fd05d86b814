//! End-to-end probe tests against a mock chat endpoint.
//!
//! The registry is populated with deterministic stand-in tools, so the
//! orchestration and dispatch paths are exercised without any of the
//! randomized simulated data.

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use probe_llm::OllamaClient;
use probe_suite::CapabilityProber;
use probe_tools::{Tool, ToolError, ToolRegistry};

struct StubTool {
    name: &'static str,
    payload: Value,
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "deterministic stand-in"
    }

    fn parameters_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        Ok(self.payload.clone())
    }
}

fn stub_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry
        .register(StubTool {
            name: "get_weather",
            payload: json!({"city": "Istanbul", "temperature": 20}),
        })
        .unwrap();
    registry
        .register(StubTool {
            name: "calculator",
            payload: json!({"result": 105.0, "error": null}),
        })
        .unwrap();
    registry
        .register(StubTool {
            name: "search_flights",
            payload: json!({"flights": [{"flight_number": "TK123", "price": 420.0}]}),
        })
        .unwrap();
    registry
        .register(StubTool {
            name: "check_visa_requirements",
            payload: json!({"requirement": "Visa-free 90d"}),
        })
        .unwrap();
    registry
}

/// Matches requests whose JSON body carries the given top-level key.
/// Phase 1 bodies carry `tools`; phase 2 bodies carry `format`.
struct HasKey(&'static str);

impl Match for HasKey {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<Value>(&request.body)
            .map(|body| body.get(self.0).is_some())
            .unwrap_or(false)
    }
}

fn assistant_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": {"role": "assistant", "content": content},
        "done": true
    }))
}

fn tool_call_response(tool_calls: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "message": {"role": "assistant", "content": "", "tool_calls": tool_calls},
        "done": true
    }))
}

#[tokio::test]
async fn basic_probe_passes_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(assistant_response("Hello!"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_basic().await;
    assert!(outcome.passed);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn basic_probe_captures_transport_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_basic().await;
    assert!(!outcome.passed);
    assert!(outcome.error.unwrap().contains("503"));
}

#[tokio::test]
async fn tools_probe_passes_when_the_model_calls_a_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(tool_call_response(json!([
            {"function": {"name": "calculator", "arguments": {"a": 15, "b": 7, "operation": "*"}}}
        ])))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_tool_calls().await;
    assert!(outcome.passed);

    // The request must advertise both tools with auto selection.
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["tool_choice"], "auto");
    let tools = body["tools"].as_array().unwrap();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["function"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["get_weather", "calculator"]);
}

#[tokio::test]
async fn tools_probe_fails_silently_when_no_tool_is_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(assistant_response("15*7 is 105."))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_tool_calls().await;
    assert!(!outcome.passed);
    // Policy failure: no error is captured.
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn schema_probe_accepts_json_that_ignores_the_declared_fields() {
    let server = MockServer::start().await;
    // Valid JSON with none of UserInfo's required fields: the weak
    // criterion must still accept it.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(assistant_response("{\"totally\": \"unrelated\"}"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_schema().await;
    assert!(outcome.passed);

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["format"]["type"], "object");
}

#[tokio::test]
async fn schema_probe_fails_on_non_json_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(assistant_response("Here is the profile you asked for."))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_schema().await;
    assert!(!outcome.passed);
    assert!(outcome.error.unwrap().contains("invalid JSON content"));
}

#[tokio::test]
async fn combined_probe_stops_before_phase_two_when_no_tools_are_called() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(assistant_response("I recommend Rome."))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_tools_with_schema().await;
    assert!(!outcome.passed);
    assert_eq!(outcome.error.as_deref(), Some("Model called no tools."));

    // Phase 2 was never entered.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn combined_probe_appends_tool_results_in_received_order() {
    let server = MockServer::start().await;

    // Phase 1: carries `tools`. One call has a server id, one does not.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("tools"))
        .respond_with(tool_call_response(json!([
            {
                "id": "srv-1",
                "function": {
                    "name": "search_flights",
                    "arguments": {"from_city": "London", "to_city": "Rome"}
                }
            },
            {
                "function": {
                    "name": "check_visa_requirements",
                    "arguments": "{\"country\": \"Italy\", \"citizenship\": \"US\"}"
                }
            }
        ])))
        .mount(&server)
        .await;

    // Phase 2: carries `format`.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("format"))
        .respond_with(assistant_response(
            "{\"destination\": \"Rome\", \"budget\": 2000.0, \"duration_days\": 7, \
             \"activities\": [\"museums\"], \"best_season\": \"spring\"}",
        ))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_tools_with_schema().await;
    assert!(outcome.passed, "combined probe failed: {:?}", outcome.error);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let phase2: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = phase2["messages"].as_array().unwrap();

    // system + user + assistant + two tool results + synthesis system.
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[5]["role"], "system");

    // Tool messages in the order the server returned the calls, with
    // the server id kept and a positional fallback synthesized.
    assert_eq!(messages[3]["role"], "tool");
    assert_eq!(messages[3]["name"], "search_flights");
    assert_eq!(messages[3]["tool_call_id"], "srv-1");
    let flights: Value = serde_json::from_str(messages[3]["content"].as_str().unwrap()).unwrap();
    assert_eq!(flights["flights"][0]["flight_number"], "TK123");

    assert_eq!(messages[4]["role"], "tool");
    assert_eq!(messages[4]["name"], "check_visa_requirements");
    assert_eq!(messages[4]["tool_call_id"], "call_1");
    let visa: Value = serde_json::from_str(messages[4]["content"].as_str().unwrap()).unwrap();
    assert_eq!(visa["requirement"], "Visa-free 90d");

    // Phase 2 is schema-constrained but advertises no tools.
    assert!(phase2.get("tools").is_none());
    assert_eq!(phase2["format"]["type"], "object");
}

#[tokio::test]
async fn combined_probe_folds_unknown_tools_into_the_conversation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("tools"))
        .respond_with(tool_call_response(json!([
            {"function": {"name": "book_hotel", "arguments": {}}}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("format"))
        .respond_with(assistant_response("{\"destination\": \"Rome\"}"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    // The dispatcher contains the unknown-tool failure; the probe still
    // reaches phase 2 and passes on valid JSON.
    let outcome = prober.probe_tools_with_schema().await;
    assert!(outcome.passed);

    let requests = server.received_requests().await.unwrap();
    let phase2: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let messages = phase2["messages"].as_array().unwrap();
    let payload: Value = serde_json::from_str(messages[3]["content"].as_str().unwrap()).unwrap();
    assert_eq!(payload["error"], "Unknown tool book_hotel");
}

#[tokio::test]
async fn combined_probe_fails_when_synthesis_is_not_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("tools"))
        .respond_with(tool_call_response(json!([
            {"function": {"name": "search_flights", "arguments": {}}}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(HasKey("format"))
        .respond_with(assistant_response("Rome would be lovely in spring."))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let outcome = prober.probe_tools_with_schema().await;
    assert!(!outcome.passed);
    assert!(outcome.error.unwrap().contains("invalid JSON content"));
}

#[tokio::test]
async fn run_all_never_short_circuits() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("broken"))
        .mount(&server)
        .await;

    let client = OllamaClient::new(server.uri());
    let registry = stub_registry();
    let prober = CapabilityProber::new(&client, &registry, "mistral:7b");

    let report = prober.run_all().await;

    // All four probes executed and produced a result.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    assert!(!report.basic.passed);
    assert!(!report.tools.passed);
    assert!(!report.schema.passed);
    assert!(!report.combined.passed);
    assert_eq!(report.errors().len(), 4);
}
