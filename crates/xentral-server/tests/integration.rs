use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use xentral_mcp::{ProtocolEngine, ServerInfo};
use xentral_server::app_state::{AppState, ServerOptions};
use xentral_tools::ApiConfig;

mod mock_tools;
use mock_tools::{mock_registry, weather_definition, MockWeather};

fn build_state() -> AppState {
    let engine = Arc::new(ProtocolEngine::new(
        ServerInfo::new("xentral-mcp-server", "0.1.0"),
        mock_registry(),
    ));
    AppState::new(
        engine,
        ApiConfig::default().into_shared(),
        ServerOptions {
            debug: false,
            log_requests: true,
        },
    )
}

fn build_test_app(state: AppState) -> TestServer {
    let app = xentral_server::router::create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn health_check() {
    let server = build_test_app(build_state());
    let resp = server.get("/health").await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["tools_count"], 2);
    assert_eq!(body["initialized"], false);
}

#[tokio::test]
async fn mcp_initialize() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["result"]["serverInfo"]["name"], "xentral-mcp-server");
    assert_eq!(body["result"]["protocolVersion"], "2024-11-05");
    assert!(body.get("error").is_none());

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["initialized"], true);
}

#[tokio::test]
async fn mcp_tools_list() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "weather");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["city"]));
    assert_eq!(
        tools[0]["inputSchema"]["properties"]["limit"]["type"],
        "integer"
    );
}

#[tokio::test]
async fn reregistered_tool_appears_once() {
    let state = build_state();
    state.engine.registry().register(
        weather_definition("Weather, revised"),
        Arc::new(MockWeather),
    );
    let server = build_test_app(state);

    let body: Value = server
        .post("/mcp")
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
        .await
        .json();

    let tools = body["result"]["tools"].as_array().unwrap();
    let weather: Vec<&Value> = tools.iter().filter(|t| t["name"] == "weather").collect();
    assert_eq!(weather.len(), 1);
    assert_eq!(weather[0]["description"], "Weather, revised");
}

#[tokio::test]
async fn mcp_tools_call() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": "call-1",
            "method": "tools/call",
            "params": {"name": "weather", "arguments": {"city": "Berlin"}}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], "call-1");
    assert_eq!(
        body["result"],
        json!({"content": [{"type": "text", "text": "Sunny in Berlin"}], "isError": false})
    );
}

#[tokio::test]
async fn mcp_unknown_tool() {
    let server = build_test_app(build_state());

    let body: Value = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "nonexistent", "arguments": {}}
        }))
        .await
        .json();

    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["id"], 7);
}

#[tokio::test]
async fn mcp_tool_failure_keeps_serving() {
    let server = build_test_app(build_state());

    let body: Value = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 3,
            "method": "tools/call",
            "params": {"name": "flaky"}
        }))
        .await
        .json();

    assert_eq!(body["error"]["code"], -32001);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("ERP maintenance"));
    assert!(body.get("result").is_none());

    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn mcp_unknown_method() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "nonexistent/method",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body.get("result").is_none());
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn mcp_malformed_body() {
    let server = build_test_app(build_state());

    let resp = server.post("/mcp").text("{\"jsonrpc\": \"2.0\",").await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32700);
    assert!(body["id"].is_null());
}

#[tokio::test]
async fn mcp_notification_returns_accepted() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/mcp")
        .json(&json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
    assert!(resp.as_bytes().is_empty());
}

#[tokio::test]
async fn mcp_alias_endpoints() {
    let server = build_test_app(build_state());

    for path in ["/mcp/initialize", "/mcp/list_tools", "/mcp/call_tool"] {
        let resp = server
            .post(path)
            .json(&json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
            .await;
        resp.assert_status_ok();
        let body: Value = resp.json();
        assert!(body["result"]["tools"].is_array(), "path {path}");
    }
}

#[tokio::test]
async fn tools_endpoint() {
    let server = build_test_app(build_state());
    let body: Value = server.get("/tools").await.json();

    assert_eq!(body["total"], 2);
    assert_eq!(
        body["tools"][0]["parameters"][0],
        json!({"name": "city", "type": "string", "required": true})
    );
}

#[tokio::test]
async fn info_masks_credentials() {
    let server = build_test_app(build_state());

    server
        .post("/config/credentials")
        .json(&json!({
            "api_url": "https://erp.example.com/",
            "api_key": "very-secret-key-123"
        }))
        .await
        .assert_status_ok();

    let resp = server.get("/info").await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["config"]["api_url"], "https://erp.example.com");
    assert_eq!(body["config"]["api_key"], "***");
    assert_eq!(body["server"]["tools_count"], 2);
    assert_eq!(body["server"]["protocol_version"], "2024-11-05");
    assert!(!resp.text().contains("very-secret-key-123"));
}

#[tokio::test]
async fn credentials_require_both_fields() {
    let server = build_test_app(build_state());

    let resp = server
        .post("/config/credentials")
        .json(&json!({"api_url": "https://erp.example.com"}))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_path_lists_endpoints() {
    let server = build_test_app(build_state());
    let resp = server.get("/nope").await;

    resp.assert_status_not_found();
    let body: Value = resp.json();
    assert!(body["available_endpoints"].is_array());
}
