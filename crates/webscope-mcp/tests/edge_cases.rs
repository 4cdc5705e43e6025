//! Edge case integration tests for webscope-mcp.
//!
//! Everything here drives the protocol handler directly, the way a transport
//! would. Tests that need a live Chrome or Lighthouse binary are `#[ignore]`d
//! so the default suite runs anywhere.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use webscope::BrowserConfig;
use webscope_mcp::protocol::ProtocolHandler;
use webscope_mcp::session::BrowserSessionManager;
use webscope_mcp::transport::framing;
use webscope_mcp::types::*;

// ─────────────────────── helpers ───────────────────────

/// Create a session manager that has not launched anything yet.
fn arc_session() -> Arc<Mutex<BrowserSessionManager>> {
    Arc::new(Mutex::new(BrowserSessionManager::new(
        BrowserConfig::default(),
    )))
}

fn handler() -> ProtocolHandler {
    ProtocolHandler::new(arc_session())
}

/// Build an MCP JSON-RPC request.
fn mcp_request(id: i64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
}

/// Build an initialize request.
fn init_request() -> Value {
    mcp_request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "test-client", "version": "1.0" }
        }),
    )
}

/// Send a JSON-RPC message through the handler and return the response.
async fn send(handler: &ProtocolHandler, msg: Value) -> Option<Value> {
    let parsed: JsonRpcMessage = serde_json::from_value(msg).unwrap();
    handler.handle_message(parsed).await
}

/// Send and unwrap the response.
async fn send_unwrap(handler: &ProtocolHandler, msg: Value) -> Value {
    send(handler, msg).await.expect("expected response")
}

/// Call a tool and return the response.
async fn call_tool(handler: &ProtocolHandler, id: i64, name: &str, arguments: Value) -> Value {
    let msg = mcp_request(
        id,
        "tools/call",
        json!({ "name": name, "arguments": arguments }),
    );
    send_unwrap(handler, msg).await
}

// ─────────────────────── protocol ───────────────────────

#[tokio::test]
async fn initialize_reports_server_identity() {
    let handler = handler();
    let resp = send_unwrap(&handler, init_request()).await;

    let result = &resp["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "webscope-mcp");
    assert!(result["capabilities"]["tools"].is_object());
    assert!(result["capabilities"]["resources"].is_object());
}

#[tokio::test]
async fn future_protocol_version_is_tolerated() {
    let handler = handler();
    let msg = mcp_request(
        0,
        "initialize",
        json!({
            "protocolVersion": "2025-11-25",
            "capabilities": {},
            "clientInfo": { "name": "future-client", "version": "99.0" }
        }),
    );
    let resp = send_unwrap(&handler, msg).await;

    // Server answers with its own version, it does not fail the handshake.
    assert_eq!(resp["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let result = framing::parse_message(r#"{"broken":"#);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code(), -32700);

    assert!(framing::parse_message("").is_err());
    assert!(framing::parse_message(r#"{"jsonrpc":"2.0","id":1,"method":"#).is_err());
}

#[tokio::test]
async fn wrong_jsonrpc_version_is_rejected() {
    let handler = handler();
    let msg = json!({
        "jsonrpc": "1.0",
        "id": 1,
        "method": "ping"
    });
    let resp = send_unwrap(&handler, msg).await;
    assert_eq!(resp["error"]["code"], -32600);
}

#[tokio::test]
async fn unknown_method_is_reported_not_thrown() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(1, "foo/bar/baz", json!({}))).await;
    assert_eq!(resp["error"]["code"], -32601);
}

#[tokio::test]
async fn notifications_produce_no_response() {
    let handler = handler();
    let notif = json!({ "jsonrpc": "2.0", "method": "initialized" });
    assert!(send(&handler, notif).await.is_none());
}

#[tokio::test]
async fn ping_answers_with_empty_object() {
    let handler = handler();
    let resp = send_unwrap(&handler, mcp_request(1, "ping", json!({}))).await;
    assert_eq!(resp["result"], json!({}));
}

#[tokio::test]
async fn shutdown_without_a_browser_succeeds() {
    let session = arc_session();
    let handler = ProtocolHandler::new(session.clone());
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(9, "shutdown", json!(null))).await;
    assert!(resp.get("result").is_some(), "shutdown should succeed: {resp}");
    assert!(!session.lock().await.is_running());
}

// ─────────────────────── tool dispatch ───────────────────────

#[tokio::test]
async fn tools_list_names_the_full_surface() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(1, "tools/list", json!({}))).await;
    let tools = resp["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();

    assert_eq!(
        names,
        [
            "navigate",
            "screenshot",
            "click",
            "fill",
            "select",
            "hover",
            "evaluate",
            "analyze",
            "get_metrics"
        ]
    );
}

#[tokio::test]
async fn unknown_tool_returns_an_error_envelope() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "teleport", json!({})).await;
    assert_eq!(resp["error"]["code"], -32803);
    assert!(resp["error"]["message"].as_str().unwrap().contains("teleport"));
}

#[tokio::test]
async fn tools_call_without_params_is_invalid() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(1, "tools/call", json!(null))).await;
    assert_eq!(resp["error"]["code"], -32602);
}

// Parameter shapes are checked before any engine call, so none of these
// need a Chrome binary on the machine.

#[tokio::test]
async fn navigate_requires_a_url() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "navigate", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn screenshot_requires_a_name() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "screenshot", json!({ "selector": "#hero" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn fill_requires_selector_and_value() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "fill", json!({ "selector": "#q" })).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn evaluate_requires_a_script() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "evaluate", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn analyze_rejects_unknown_categories() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(
        &handler,
        1,
        "analyze",
        json!({ "url": "https://example.com", "categories": ["velocity"] }),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32602);
}

#[tokio::test]
async fn get_metrics_requires_a_url() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "get_metrics", json!({})).await;
    assert_eq!(resp["error"]["code"], -32602);
}

// ─────────────────────── resources ───────────────────────

#[tokio::test]
async fn resources_list_starts_with_console_logs_only() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(1, "resources/list", json!({}))).await;
    let resources = resp["result"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0]["uri"], "console://logs");
    assert_eq!(resources[0]["mimeType"], "text/plain");
}

#[tokio::test]
async fn screenshots_appear_in_the_resource_list() {
    let session = arc_session();
    session
        .lock()
        .await
        .store_screenshot("home".to_string(), "aGVsbG8=".to_string());
    let handler = ProtocolHandler::new(session);
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(&handler, mcp_request(1, "resources/list", json!({}))).await;
    let resources = resp["result"]["resources"].as_array().unwrap();
    let uris: Vec<&str> = resources
        .iter()
        .map(|r| r["uri"].as_str().unwrap())
        .collect();
    assert!(uris.contains(&"console://logs"));
    assert!(uris.contains(&"screenshot://home"));

    let read = send_unwrap(
        &handler,
        mcp_request(2, "resources/read", json!({ "uri": "screenshot://home" })),
    )
    .await;
    assert_eq!(read["result"]["contents"][0]["blob"], "aGVsbG8=");
    assert_eq!(read["result"]["contents"][0]["mimeType"], "image/png");
}

#[tokio::test]
async fn console_log_resource_reflects_session_state() {
    let session = arc_session();
    session
        .lock()
        .await
        .push_console_logs(vec!["loaded app".to_string(), "clicked buy".to_string()]);
    let handler = ProtocolHandler::new(session);
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(
        &handler,
        mcp_request(1, "resources/read", json!({ "uri": "console://logs" })),
    )
    .await;
    assert_eq!(
        resp["result"]["contents"][0]["text"],
        "loaded app\nclicked buy"
    );
}

#[tokio::test]
async fn unknown_resource_uri_is_reported() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = send_unwrap(
        &handler,
        mcp_request(1, "resources/read", json!({ "uri": "reports://latest" })),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32802);
}

// ─────────────────────── live-engine flows ───────────────────────
//
// These need a Chrome/Chromium binary (and, for audits, the lighthouse CLI)
// on PATH. Run with: cargo test -- --ignored

#[tokio::test]
#[ignore = "needs a Chrome binary"]
async fn navigate_then_screenshot_round_trip() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let nav = call_tool(&handler, 1, "navigate", json!({ "url": "https://example.com" })).await;
    assert!(nav.get("result").is_some(), "navigate failed: {nav}");

    let shot = call_tool(&handler, 2, "screenshot", json!({ "name": "home" })).await;
    let content = shot["result"]["content"].as_array().unwrap();
    assert_eq!(
        content[0]["text"],
        "Screenshot 'home' taken at 800x600"
    );
    assert_eq!(content[1]["type"], "image");
    assert!(!content[1]["data"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs a Chrome binary"]
async fn screenshot_of_missing_element_is_element_not_found() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    call_tool(&handler, 1, "navigate", json!({ "url": "https://example.com" })).await;
    let resp = call_tool(
        &handler,
        2,
        "screenshot",
        json!({ "name": "ghost", "selector": "#does-not-exist-anywhere" }),
    )
    .await;
    assert_eq!(resp["error"]["code"], -32850);
}

#[tokio::test]
#[ignore = "needs a Chrome binary"]
async fn current_page_is_stable_until_browser_reopen() {
    let session = arc_session();

    let first = session.lock().await.current_page().unwrap();
    let second = session.lock().await.current_page().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    session.lock().await.open_browser().unwrap();
    let third = session.lock().await.current_page().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));

    session.lock().await.close();
}

#[tokio::test]
#[ignore = "needs a Chrome binary"]
async fn evaluate_captures_console_output() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    call_tool(&handler, 1, "navigate", json!({ "url": "https://example.com" })).await;
    let resp = call_tool(
        &handler,
        2,
        "evaluate",
        json!({ "script": "console.log('from the page'); 6 * 7" }),
    )
    .await;

    let text = resp["result"]["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed["Execution result:"], 42);
    assert_eq!(parsed["Console output:"], "from the page");
}

#[tokio::test]
#[ignore = "needs Chrome and the lighthouse CLI"]
async fn get_metrics_summarises_an_audit() {
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(&handler, 1, "get_metrics", json!({ "url": "https://example.com" })).await;
    let text = resp["result"]["content"][0]["text"].as_str().unwrap();
    let parsed: Value = serde_json::from_str(text).unwrap();

    assert_eq!(parsed["success"], true);
    let score = parsed["metrics"]["performanceScore"].as_i64().unwrap();
    assert!((0..=100).contains(&score));
    assert!(parsed["metrics"]["first-contentful-paint"]["value"].is_number());
}

#[tokio::test]
#[ignore = "needs Chrome and the lighthouse CLI"]
async fn analyze_persists_exactly_one_report() {
    let dir = tempfile::tempdir().unwrap();
    let handler = handler();
    send_unwrap(&handler, init_request()).await;

    let resp = call_tool(
        &handler,
        1,
        "analyze",
        json!({
            "url": "https://example.com",
            "onlyMetrics": true,
            "outputPath": dir.path().to_str().unwrap()
        }),
    )
    .await;
    assert!(resp.get("result").is_some(), "analyze failed: {resp}");

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().flatten().collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().to_string_lossy().into_owned();
    assert!(name.starts_with("lighthouse-"));
    assert!(name.ends_with(".json"));
}
