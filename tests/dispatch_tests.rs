//! Dispatch boundary: credentials, unknown tools, and the MCP surface

mod fixtures;

use fixtures::*;
use serde_json::json;
use std::sync::Arc;

use wordpress_mcp::handlers::wordpress::catalog::TOOL_NAMES;
use wordpress_mcp::mcp::{JsonRpcResponse, McpHandler, ToolCallParams};
use wordpress_mcp::{McpServer, WordPressConfig, WordPressHandler};

const CONFIG_ERROR_PREFIX: &str = "Error: WordPress credentials not configured.";

#[tokio::test]
async fn test_unknown_tool_is_reported_not_raised() {
    let mock = MockWordPress::new();
    let handler = handler_with(&mock);

    for name in ["delete_everything", "", "CREATE_POST", "list posts"] {
        let result = handler.dispatch(name, args(json!({"post_id": 1}))).await;
        assert!(result.is_error);
        assert_eq!(result.text(), format!("Unknown tool: {}", name));
    }
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_missing_credentials_short_circuit_every_tool() {
    let incomplete = [
        WordPressConfig::new("", "editor", "pw"),
        WordPressConfig::new(SITE_URL, "", "pw"),
        WordPressConfig::new(SITE_URL, "editor", ""),
        WordPressConfig::default(),
    ];

    for config in incomplete {
        let mock = MockWordPress::new();
        let handler = WordPressHandler::with_backend(config, mock.clone());

        for name in TOOL_NAMES {
            let result = handler
                .dispatch(name, args(json!({"post_id": 1, "title": "T", "content": "C"})))
                .await;
            assert!(result.is_error);
            assert!(
                result.text().starts_with(CONFIG_ERROR_PREFIX),
                "{}: {}",
                name,
                result.text()
            );
        }
        assert_eq!(mock.request_count(), 0);
    }
}

#[tokio::test]
async fn test_missing_credentials_checked_before_tool_lookup() {
    let mock = MockWordPress::new();
    let handler = WordPressHandler::with_backend(WordPressConfig::default(), mock.clone());

    let result = handler.dispatch("no_such_tool", args(json!({}))).await;
    assert!(result.text().starts_with(CONFIG_ERROR_PREFIX));
}

#[tokio::test]
async fn test_every_request_carries_basic_auth() {
    let mock = MockWordPress::new();
    mock.respond(200, json!([]));
    mock.respond(200, json!([]));
    let handler = handler_with(&mock);

    handler.dispatch("list_tags", args(json!({}))).await;
    handler.dispatch("list_posts", args(json!({}))).await;

    // base64("editor:abcd efgh ijkl mnop")
    let expected = "Basic ZWRpdG9yOmFiY2QgZWZnaCBpamtsIG1ub3A=";
    for request in mock.requests() {
        assert_eq!(request.header("Authorization"), Some(expected));
    }
}

#[tokio::test]
async fn test_handlers_with_different_sites_are_independent() {
    let first_mock = MockWordPress::new();
    let second_mock = MockWordPress::new();
    first_mock.respond(200, json!([]));
    second_mock.respond(200, json!([]));

    let first = WordPressHandler::with_backend(
        WordPressConfig::new("https://one.example.com/", "a", "1"),
        first_mock.clone(),
    );
    let second = WordPressHandler::with_backend(
        WordPressConfig::new("https://two.example.com", "b", "2"),
        second_mock.clone(),
    );

    first.dispatch("list_tags", args(json!({}))).await;
    second.dispatch("list_tags", args(json!({}))).await;

    assert_eq!(
        first_mock.only_request().url,
        "https://one.example.com/wp-json/wp/v2/tags"
    );
    assert_eq!(
        second_mock.only_request().url,
        "https://two.example.com/wp-json/wp/v2/tags"
    );
}

#[tokio::test]
async fn test_call_tool_without_arguments() {
    let mock = MockWordPress::new();
    mock.respond(200, json!([]));
    let handler = handler_with(&mock);

    let result = handler
        .call_tool(ToolCallParams {
            name: "list_categories".to_string(),
            arguments: None,
        })
        .await
        .unwrap();

    assert!(!result.is_error);
    assert_eq!(mock.only_request().query_value("per_page"), Some("100"));
}

#[tokio::test]
async fn test_list_tools_returns_catalog() {
    let mock = MockWordPress::new();
    let handler = handler_with(&mock);

    let tools = handler.list_tools().await.unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, TOOL_NAMES);
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_stdio_session_end_to_end() {
    let mock = MockWordPress::new();
    mock.respond(200, post_json(3, "Hello", "publish"));
    let server = McpServer::new(Arc::new(handler_with(&mock)));

    let input = [
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"}
        }}),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {
            "name": "get_post", "arguments": {"post_id": 3}
        }}),
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {
            "name": "nope", "arguments": {}
        }}),
    ]
    .iter()
    .map(|message| format!("{}\n", message))
    .collect::<String>();

    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<JsonRpcResponse> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 4);

    let init = responses[0].result.as_ref().unwrap();
    assert_eq!(init["serverInfo"]["name"], "wordpress-mcp");
    assert_eq!(init["serverInfo"]["version"], "0.1.0");
    assert_eq!(init["capabilities"]["tools"]["listChanged"], false);

    let tools = responses[1].result.as_ref().unwrap()["tools"].as_array().unwrap().clone();
    assert_eq!(tools.len(), 8);
    assert!(tools.iter().all(|t| t.get("inputSchema").is_some()));

    let call = responses[2].result.as_ref().unwrap();
    assert_eq!(call["isError"], false);
    assert_eq!(call["content"][0]["type"], "text");
    assert!(call["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Post Details:\nID: 3"));

    let unknown = responses[3].result.as_ref().unwrap();
    assert_eq!(unknown["isError"], true);
    assert_eq!(unknown["content"][0]["text"], "Unknown tool: nope");
}
