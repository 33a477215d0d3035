//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test gateway servers.
//! Each test gets an isolated gateway wired to its own stub downstream.

use super::constants::*;
use super::downstream::{spawn_downstream, DownstreamHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use trainercentral_mcp_gateway::mcp::resources::register_all_widgets;
use trainercentral_mcp_gateway::mcp::tools::register_all_tools;
use trainercentral_mcp_gateway::server::state::ServerState;
use trainercentral_mcp_gateway::server::{server::make_app, RequestsLoggingLevel, ServerConfig};
use trainercentral_mcp_gateway::tc::{TrainerCentralApi, TrainerCentralClient};
use trainercentral_mcp_gateway::ToolRegistry;

/// Test gateway instance wired to an isolated stub downstream
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the gateway is listening on
    pub port: u16,

    /// Handle to the stub downstream for asserting on forwarded requests
    pub downstream: DownstreamHandle,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test gateway on a random port
    ///
    /// This function:
    /// 1. Spawns a stub TrainerCentral server on a random port
    /// 2. Builds the full tool and widget registry
    /// 3. Binds the gateway to a random port (127.0.0.1:0)
    /// 4. Spawns the gateway in a background task
    /// 5. Waits for the gateway to be ready
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the gateway doesn't become ready
    /// within the timeout.
    pub async fn spawn() -> Self {
        let (downstream_url, downstream) = spawn_downstream().await;

        let mut registry = ToolRegistry::new();
        register_all_tools(&mut registry);
        register_all_widgets(&mut registry);

        let tc_api: Arc<dyn TrainerCentralApi> = Arc::new(
            TrainerCentralClient::new(&downstream_url, REQUEST_TIMEOUT_SECS)
                .expect("Failed to create downstream client"),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            public_url: base_url.clone(),
            auth_server_url: "https://accounts.zoho.in".to_string(),
        };

        let state = ServerState::new(config, registry, tc_api, "test");
        let app = make_app(state);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            downstream,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client
                .get(format!("{}/health", self.base_url))
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    return;
                }
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}
