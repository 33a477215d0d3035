//! HTTP client for end-to-end tests
//!
//! This module provides a high-level client that wraps reqwest and speaks
//! JSON-RPC to the gateway.
//!
//! When the wire format changes, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// JSON-RPC test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // JSON-RPC
    // ========================================================================

    /// POST / with a JSON-RPC request, parsed response body.
    pub async fn rpc(&self, method: &str, params: Value, token: Option<&str>) -> Value {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        self.rpc_raw(&payload, token)
            .await
            .json()
            .await
            .expect("Response was not JSON")
    }

    /// POST / with an arbitrary JSON payload, raw response.
    pub async fn rpc_raw(&self, payload: &Value, token: Option<&str>) -> Response {
        let mut request = self.client.post(&self.base_url).json(payload);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Request failed")
    }

    /// `tools/call` for a named tool.
    pub async fn call_tool(&self, name: &str, arguments: Value, token: Option<&str>) -> Value {
        self.rpc(
            "tools/call",
            json!({"name": name, "arguments": arguments}),
            token,
        )
        .await
    }

    // ========================================================================
    // Plain HTTP endpoints
    // ========================================================================

    /// GET an arbitrary path, raw response.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET an arbitrary path, parsed JSON body.
    pub async fn get_json(&self, path: &str) -> Value {
        self.get(path)
            .await
            .json()
            .await
            .expect("Response was not JSON")
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// The text of the first content block in a `tools/call` result.
pub fn result_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("No content text in response: {}", response))
}

/// Parses the first content block of a `tools/call` result as JSON.
pub fn result_json(response: &Value) -> Value {
    serde_json::from_str(result_text(response))
        .unwrap_or_else(|e| panic!("Content text was not JSON ({}): {}", e, response))
}

/// True when a `tools/call` returned the success-shaped error envelope.
pub fn is_tool_error(response: &Value) -> bool {
    response["result"]["isError"] == json!(true)
}
