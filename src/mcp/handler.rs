//! MCP HTTP Dispatcher
//!
//! Terminates one JSON-RPC request with a well-formed JSON-RPC response.
//! Authentication is enforced only for `tools/call`; every failure path
//! produces a valid response, never an unhandled error to the transport.

use axum::{body::Bytes, extract::State, http::header::AUTHORIZATION, http::HeaderMap, Json};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::context::ToolContext;
use super::protocol::{
    methods, InitializeResult, McpError, McpRequest, McpResponse, PingResult, ResourceContent,
    ResourcesCapability, ResourcesListResult, ResourcesReadParams, ResourcesReadResult,
    ServerCapabilities, ServerInfo, ToolsCallParams, ToolsCallResult, ToolsCapability,
    ToolsListResult, MCP_PROTOCOL_VERSION,
};
use super::registry::{ToolError, ToolOutcome, ToolOutput};
use crate::server::state::ServerState;
use crate::tc::AccessToken;

/// Server name reported in `initialize`
pub const SERVER_NAME: &str = "trainercentral-mcp-gateway";

/// Axum handler for `POST /` (and the `/mcp` aliases)
pub async fn mcp_endpoint(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<McpResponse> {
    Json(handle_request(&state, &headers, &body).await)
}

async fn handle_request(state: &ServerState, headers: &HeaderMap, body: &[u8]) -> McpResponse {
    // Parse the request
    let request: McpRequest = match serde_json::from_slice(body) {
        Ok(req) => req,
        Err(e) => {
            debug!("Unparseable MCP request body: {}", e);
            return McpResponse::error(None, McpError::ParseError(e.to_string()));
        }
    };

    let request_id = request.id.clone();
    info!("MCP request: method={}", request.method);

    // Dispatch based on method
    let result = match request.method.as_str() {
        methods::INITIALIZE => handle_initialize(state),
        methods::INITIALIZED => {
            // Notification; acknowledged with an empty result over HTTP.
            Ok(json!({}))
        }
        methods::PING => to_value(PingResult {}),
        methods::TOOLS_LIST => handle_tools_list(state),
        methods::TOOLS_CALL => handle_tools_call(state, headers, &request).await,
        methods::RESOURCES_LIST => handle_resources_list(state),
        methods::RESOURCES_READ => handle_resources_read(state, &request),
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    match result {
        Ok(value) => McpResponse::success(request_id, value),
        Err(error) => McpResponse::error(request_id, error),
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_initialize(state: &ServerState) -> Result<Value, McpError> {
    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
            resources: Some(ResourcesCapability {
                subscribe: Some(false),
                list_changed: None,
            }),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: state.version.clone(),
        },
    };

    to_value(result)
}

fn handle_tools_list(state: &ServerState) -> Result<Value, McpError> {
    to_value(ToolsListResult {
        tools: state.registry.list_tools(),
    })
}

async fn handle_tools_call(
    state: &ServerState,
    headers: &HeaderMap,
    request: &McpRequest,
) -> Result<Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    // Authenticate. Deliberately a success-shaped isError result instead of
    // a JSON-RPC error, so the LLM client can relay it conversationally.
    let token = match extract_bearer(headers) {
        Some(token) => token,
        None => {
            info!("Tool call {} rejected: no bearer token", params.name);
            return to_value(auth_required_result(&state.config.public_url));
        }
    };

    // Unknown tool is a protocol error, distinct from the isError shape.
    let tool = state
        .registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::MethodNotFound(format!("Tool not found: {}", params.name)))?;

    let arguments = params.arguments.clone().unwrap_or_else(|| json!({}));

    // Resolve org context: client-supplied for every tool but the lookup one.
    let org_id = extract_org_id(&arguments);
    if tool.requires_org && org_id.is_none() {
        info!("Tool call {} rejected: no orgId argument", params.name);
        return to_value(ToolsCallResult::error(
            "orgId required. Call tc_get_org_id() first.",
        ));
    }

    info!("Tool call: {} (token {})", params.name, token.redacted());
    debug!("Tool arguments: {}", arguments);

    let ctx = ToolContext {
        access_token: token,
        org_id,
        api: state.tc_api.clone(),
    };

    let result = match (tool.handler)(ctx, arguments).await {
        Ok(ToolOutcome::Plain(value)) => {
            info!("Tool call {} succeeded", params.name);
            ToolsCallResult::json(&value).map_err(|e| McpError::InternalError(e.to_string()))?
        }
        Ok(ToolOutcome::Widget { text, structured }) => {
            info!("Tool call {} succeeded (widget)", params.name);
            let mut result = ToolsCallResult::text(text).with_structured_content(structured);
            if let ToolOutput::Widget { template_uri } = &tool.output {
                result = result.with_meta(json!({ "openai/outputTemplate": template_uri }));
            }
            result
        }
        Err(tool_error) => {
            error!("Tool call {} failed: {}", params.name, tool_error.message);
            tool_error_result(tool_error)
        }
    };

    to_value(result)
}

fn handle_resources_list(state: &ServerState) -> Result<Value, McpError> {
    to_value(ResourcesListResult {
        resources: state.registry.list_resources(),
    })
}

fn handle_resources_read(state: &ServerState, request: &McpRequest) -> Result<Value, McpError> {
    let params: ResourcesReadParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let widget = state
        .registry
        .find_widget(&params.uri)
        .ok_or_else(|| McpError::ResourceNotFound(params.uri.clone()))?;

    to_value(ResourcesReadResult {
        contents: vec![ResourceContent::Text {
            uri: widget.uri.clone(),
            mime_type: Some(widget.mime_type.clone()),
            text: widget.html.clone(),
        }],
    })
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn extract_bearer(headers: &HeaderMap) -> Option<AccessToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(AccessToken::new(token))
}

/// `orgId` arrives as a string normally, but tolerate numbers.
fn extract_org_id(arguments: &Value) -> Option<String> {
    match arguments.get("orgId") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn auth_required_result(public_url: &str) -> ToolsCallResult {
    ToolsCallResult::error("Authentication required: no access token provided.").with_meta(json!({
        "mcp/www_authenticate": [format!(
            "Bearer resource_metadata=\"{}/.well-known/oauth-protected-resource\", \
             error=\"insufficient_scope\", error_description=\"You need to login to continue\"",
            public_url
        )]
    }))
}

fn tool_error_result(error: ToolError) -> ToolsCallResult {
    let text = match &error.detail {
        Some(detail) => match serde_json::to_string_pretty(detail) {
            Ok(detail_text) => format!("{}\n{}", error.message, detail_text),
            Err(_) => error.message.clone(),
        },
        None => error.message.clone(),
    };
    ToolsCallResult::error(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_bearer_happy_path() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(extract_bearer(&headers).unwrap().secret(), "abc123");
    }

    #[test]
    fn test_extract_bearer_rejects_other_schemes() {
        assert!(extract_bearer(&headers_with_auth("Basic dXNlcjpwYXNz")).is_none());
        assert!(extract_bearer(&headers_with_auth("bearer abc")).is_none());
        assert!(extract_bearer(&headers_with_auth("Bearer ")).is_none());
        assert!(extract_bearer(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_org_id_variants() {
        assert_eq!(
            extract_org_id(&json!({"orgId": "60058756004"})),
            Some("60058756004".to_string())
        );
        assert_eq!(
            extract_org_id(&json!({"orgId": 42})),
            Some("42".to_string())
        );
        assert_eq!(extract_org_id(&json!({"orgId": ""})), None);
        assert_eq!(extract_org_id(&json!({})), None);
    }

    #[test]
    fn test_auth_required_result_carries_challenge() {
        let result = auth_required_result("https://gateway.example.com");
        assert_eq!(result.is_error, Some(true));
        let meta = result.meta.unwrap();
        let challenge = meta["mcp/www_authenticate"][0].as_str().unwrap();
        assert!(challenge
            .contains("https://gateway.example.com/.well-known/oauth-protected-resource"));
    }

    #[test]
    fn test_tool_error_result_appends_detail() {
        let result = tool_error_result(ToolError::with_detail(
            "content upload failed",
            json!({"sessionId": "s1"}),
        ));
        assert_eq!(result.is_error, Some(true));
        let serialized = serde_json::to_value(&result).unwrap();
        let text = serialized["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("content upload failed"));
        assert!(text.contains("s1"));
    }
}
