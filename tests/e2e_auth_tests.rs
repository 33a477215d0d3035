//! End-to-end tests for bearer authentication and org-scoping on
//! `tools/call`.

mod common;

use common::{is_tool_error, result_text, TestClient, TestServer, TEST_ORG_ID, TEST_TOKEN};
use serde_json::json;

#[tokio::test]
async fn missing_token_yields_auth_error_result() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.call_tool("tc_get_org_id", json!({}), None).await;

    // Success-shaped envelope, not a JSON-RPC error.
    assert!(response.get("error").is_none());
    assert!(is_tool_error(&response));
    assert!(result_text(&response).contains("Authentication required"));

    let challenge = response["result"]["_meta"]["mcp/www_authenticate"][0]
        .as_str()
        .unwrap();
    assert!(challenge.starts_with("Bearer resource_metadata="));
    assert!(challenge.contains(&format!(
        "{}/.well-known/oauth-protected-resource",
        server.base_url
    )));
    assert!(challenge.contains("error=\"insufficient_scope\""));
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": "tc_get_org_id", "arguments": {}},
    });
    let response = client
        .client
        .post(&server.base_url)
        .header("authorization", "Basic dXNlcjpwYXNz")
        .json(&payload)
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["result"]["isError"], true);
}

#[tokio::test]
async fn token_is_forwarded_to_downstream_verbatim() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .call_tool("tc_get_org_id", json!({}), Some(TEST_TOKEN))
        .await;
    assert!(!is_tool_error(&response));

    let recorded = server
        .downstream
        .last_request_to("portals.json")
        .expect("No downstream call recorded");
    assert_eq!(recorded.bearer.as_deref(), Some(TEST_TOKEN));
}

#[tokio::test]
async fn org_scoped_tool_without_org_id_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .call_tool("tc_list_courses", json!({}), Some(TEST_TOKEN))
        .await;

    assert!(is_tool_error(&response));
    assert_eq!(
        result_text(&response),
        "orgId required. Call tc_get_org_id() first."
    );
    // The downstream must not have been touched.
    assert!(server.downstream.requests().is_empty());
}

#[tokio::test]
async fn org_lookup_tool_needs_no_org_id() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .call_tool("tc_get_org_id", json!({}), Some(TEST_TOKEN))
        .await;
    assert!(!is_tool_error(&response));
}

#[tokio::test]
async fn numeric_org_id_is_accepted() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let org: u64 = TEST_ORG_ID.parse().unwrap();
    let response = client
        .call_tool("tc_list_courses", json!({"orgId": org}), Some(TEST_TOKEN))
        .await;
    assert!(!is_tool_error(&response));

    let recorded = server.downstream.last_request_to("courses.json").unwrap();
    assert!(recorded.path.contains(TEST_ORG_ID));
}
