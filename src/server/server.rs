use anyhow::Result;
use std::time::Duration;

use tracing::info;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use super::{log_requests, state::*, ServerConfig};
use crate::mcp::handler::mcp_endpoint;
use crate::mcp::resources::SKYBRIDGE_MIME_TYPE;

/// Human-facing name reported by the `GET /` descriptor.
const SERVICE_TITLE: &str = "TrainerCentral MCP Server";

/// Service identifier reported by `GET /health`.
const SERVICE_ID: &str = "trainercentral-mcp";

/// OAuth scopes the downstream API calls require.
const SUPPORTED_SCOPES: [&str; 6] = [
    "TrainerCentral.sessionapi.ALL",
    "TrainerCentral.sectionapi.ALL",
    "TrainerCentral.courseapi.ALL",
    "TrainerCentral.userapi.ALL",
    "TrainerCentral.talkapi.ALL",
    "TrainerCentral.portalapi.READ",
];

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Serialize)]
struct ServiceDescriptor {
    name: &'static str,
    version: String,
    protocol: &'static str,
    uptime: String,
    tools_count: usize,
    tools: Vec<String>,
    instructions: &'static str,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let descriptor = ServiceDescriptor {
        name: SERVICE_TITLE,
        version: state.version.clone(),
        protocol: "mcp",
        uptime: format_uptime(state.start_time.elapsed()),
        tools_count: state.registry.tool_count(),
        tools: state.registry.tool_names(),
        instructions: "Call tc_get_org_id() first to get orgId, then pass it to all other tools.",
    };
    Json(descriptor)
}

async fn health(State(registry): State<GuardedToolRegistry>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_ID,
        "tools_count": registry.tool_count(),
    }))
}

async fn oauth_protected_resource(State(config): State<ServerConfig>) -> impl IntoResponse {
    Json(json!({
        "resource": config.public_url,
        "authorization_servers": [config.auth_server_url],
        "scopes_supported": SUPPORTED_SCOPES,
        "resource_documentation": format!("{}/docs", config.public_url),
    }))
}

async fn oauth_authorization_server(State(config): State<ServerConfig>) -> impl IntoResponse {
    Json(json!({
        "issuer": config.auth_server_url,
        "authorization_endpoint": format!("{}/oauth/v2/auth", config.auth_server_url),
        "token_endpoint": format!("{}/oauth/v2/token", config.auth_server_url),
        "scopes_supported": SUPPORTED_SCOPES,
        "response_types_supported": ["code"],
        "grant_types_supported": ["authorization_code", "refresh_token"],
        "code_challenge_methods_supported": ["S256"],
    }))
}

/// Serves the widget HTML directly over HTTP, for clients that fetch the
/// template by URL instead of through `resources/read`.
async fn widget_resource(
    State(registry): State<GuardedToolRegistry>,
    Path(filename): Path<String>,
) -> Response {
    match registry.find_widget_by_filename(&filename) {
        Some(widget) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, SKYBRIDGE_MIME_TYPE)],
            widget.html.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn make_app(state: ServerState) -> Router {
    let app: Router = Router::new()
        .route("/", get(home).post(mcp_endpoint))
        .route("/mcp", axum::routing::post(mcp_endpoint))
        .route("/mcp/", axum::routing::post(mcp_endpoint))
        .route("/health", get(health))
        .route(
            "/.well-known/oauth-protected-resource",
            get(oauth_protected_resource),
        )
        .route(
            "/.well-known/oauth-authorization-server",
            get(oauth_authorization_server),
        )
        // OIDC alias; some clients probe this path for the same document.
        .route(
            "/.well-known/openid-configuration",
            get(oauth_authorization_server),
        )
        .route("/mcp/resource/{filename}", get(widget_resource))
        .with_state(state.clone());

    app.layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(state: ServerState) -> Result<()> {
    let port = state.config.port;
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
