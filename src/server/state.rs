use axum::extract::FromRef;

use crate::mcp::registry::ToolRegistry;
use crate::tc::TrainerCentralApi;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedToolRegistry = Arc<ToolRegistry>;
pub type GuardedTrainerCentralApi = Arc<dyn TrainerCentralApi>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub registry: GuardedToolRegistry,
    pub tc_api: GuardedTrainerCentralApi,
    pub version: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        registry: ToolRegistry,
        tc_api: GuardedTrainerCentralApi,
        version: impl Into<String>,
    ) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            registry: Arc::new(registry),
            tc_api,
            version: version.into(),
        }
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}

impl FromRef<ServerState> for GuardedToolRegistry {
    fn from_ref(input: &ServerState) -> Self {
        input.registry.clone()
    }
}

impl FromRef<ServerState> for GuardedTrainerCentralApi {
    fn from_ref(input: &ServerState) -> Self {
        input.tc_api.clone()
    }
}
