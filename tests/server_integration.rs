//! MCP server integration tests
//!
//! Drives a complete stdio session through `McpServer::run` with an
//! in-memory reader and writer, backed by a mock registry gateway.

use nzbn_mcp::config::{ApiConfig, Configuration};
use nzbn_mcp::server::{nzbn_registry, McpServer};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NZBN: &str = "9429041864373";

fn config_for(server: &MockServer) -> Configuration {
    Configuration {
        api: ApiConfig::new(server.uri(), "test-key"),
        ..Configuration::default()
    }
}

/// Feed `messages` one per line and return every response line, parsed.
async fn run_session(server: &McpServer, messages: &[Value]) -> Vec<Value> {
    let input: String = messages
        .iter()
        .map(|m| format!("{}\n", m))
        .collect();
    let mut output: Vec<u8> = Vec::new();

    server.run(input.as_bytes(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: u64, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": "get_entity", "arguments": arguments}
    })
}

#[tokio::test]
async fn test_full_session() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/entities/{}", NZBN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Example Co"})))
        .expect(1)
        .mount(&gateway)
        .await;

    let server = McpServer::from_config(&config_for(&gateway)).unwrap();
    let responses = run_session(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2024-11-05", "capabilities": {},
                              "clientInfo": {"name": "test", "version": "1"}}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            call(3, json!({"nzbn": NZBN})),
            call(4, json!({"nzbn": "123"})),
        ],
    )
    .await;

    // The notification produces no output line.
    assert_eq!(responses.len(), 4);

    let init = &responses[0];
    assert_eq!(init["id"], 1);
    assert_eq!(init["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(init["result"]["serverInfo"]["name"], "nzbn_mcp");
    assert!(init["result"]["capabilities"]["tools"].is_object());

    let list = &responses[1];
    let tools = list["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_entity");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["nzbn"]));
    assert_eq!(tools[0]["annotations"]["readOnlyHint"], true);

    let found = &responses[2];
    assert_eq!(found["id"], 3);
    assert_eq!(found["result"]["isError"], false);
    assert_eq!(
        found["result"]["content"][0]["text"],
        "{\n  \"name\": \"Example Co\"\n}"
    );

    let invalid = &responses[3];
    assert_eq!(invalid["id"], 4);
    assert_eq!(invalid["result"]["isError"], true);
    assert!(invalid["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Invalid NZBN"));
}

#[tokio::test]
async fn test_upstream_failures_are_tool_errors() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/entities/{}", NZBN)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&gateway)
        .await;
    Mock::given(method("GET"))
        .and(path("/entities/9429000000000"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&gateway)
        .await;

    let server = McpServer::from_config(&config_for(&gateway)).unwrap();
    let responses = run_session(
        &server,
        &[
            call(1, json!({"nzbn": NZBN})),
            call(2, json!({"nzbn": "9429000000000"})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    for response in &responses {
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
    }
    assert_eq!(
        responses[0]["result"]["content"][0]["text"],
        "Entity not found. Verify the identifier is correct."
    );
    assert_eq!(
        responses[1]["result"]["content"][0]["text"],
        "Unauthorised. Check the API key configuration."
    );
}

#[tokio::test]
async fn test_bad_arguments_make_no_request() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&gateway)
        .await;

    let server = McpServer::from_config(&config_for(&gateway)).unwrap();
    let responses = run_session(
        &server,
        &[
            call(1, json!({})),
            call(2, json!({"nzbn": 9429041864373u64})),
            call(3, json!({"nzbn": NZBN, "extra": true})),
            call(4, json!({"nzbn": "94290418643ab"})),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);
    for response in &responses {
        assert_eq!(response["result"]["isError"], true, "{}", response);
    }

    gateway.verify().await;
}

#[tokio::test]
async fn test_protocol_errors_keep_session_alive() {
    let gateway = MockServer::start().await;
    let server = McpServer::from_config(&config_for(&gateway)).unwrap();

    let input = concat!(
        "this is not json\n",
        "\n",
        "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"prompts/list\"}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":8,\"method\":\"tools/call\",\"params\":{\"name\":\"get_director\"}}\n",
        "{\"jsonrpc\":\"2.0\",\"id\":9,\"method\":\"ping\"}\n",
    );
    let mut output: Vec<u8> = Vec::new();
    server.run(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[1]["id"], 7);
    assert_eq!(responses[2]["error"]["code"], -32602);
    assert_eq!(responses[3]["id"], 9);
    assert_eq!(responses[3]["result"], json!({}));
}

#[tokio::test]
async fn test_invalid_utf8_line_does_not_end_session() {
    let gateway = MockServer::start().await;
    let server = McpServer::from_config(&config_for(&gateway)).unwrap();

    let mut input: Vec<u8> = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");
    let mut output: Vec<u8> = Vec::new();

    server.run(input.as_slice(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 1);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_null_id_is_answered() {
    let gateway = MockServer::start().await;
    let server = McpServer::from_config(&config_for(&gateway)).unwrap();

    let responses = run_session(
        &server,
        &[
            json!({"jsonrpc": "2.0", "id": null, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn test_unknown_protocol_version_gets_latest() {
    let gateway = MockServer::start().await;
    let server = McpServer::from_config(&config_for(&gateway)).unwrap();

    let responses = run_session(
        &server,
        &[json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                 "params": {"protocolVersion": "1999-01-01"}})],
    )
    .await;

    assert_eq!(responses[0]["result"]["protocolVersion"], "2025-06-18");
}

#[tokio::test]
async fn test_transcript_records_calls() {
    let gateway = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/entities/{}", NZBN)))
        .respond_with(ResponseTemplate::new(429))
        .mount(&gateway)
        .await;

    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("logs").join("session.md");

    let mut config = config_for(&gateway);
    config.logging.transcript_file = Some(transcript.to_string_lossy().into_owned());

    let server = McpServer::from_config(&config).unwrap();
    run_session(&server, &[call(1, json!({"nzbn": NZBN}))]).await;

    let content = std::fs::read_to_string(&transcript).unwrap();
    assert!(content.starts_with("# NZBN MCP Transcript"));
    assert!(content.contains("## Session Started"));
    assert!(content.contains("\"subscription_key_set\": true"));
    assert!(!content.contains("test-key"));
    assert!(content.contains("**Tool:** get_entity"));
    assert!(content.contains("**Error:**"));
    assert!(content.contains("Rate limit exceeded. Wait before retrying."));
    assert!(content.contains("### Session Completed"));
}

#[test]
fn test_tool_listing_leaves_transcript_untouched() {
    let dir = TempDir::new().unwrap();
    let transcript = dir.path().join("session.md");

    let mut config = Configuration::default();
    config.logging.transcript_file = Some(transcript.to_string_lossy().into_owned());

    let registry = nzbn_registry(&config.api).unwrap();
    let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();

    assert_eq!(names, vec!["get_entity".to_string()]);
    assert!(!transcript.exists());
}
