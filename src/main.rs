use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trainercentral_mcp_gateway::config::{AppConfig, CliConfig, FileConfig};
use trainercentral_mcp_gateway::mcp::resources::register_all_widgets;
use trainercentral_mcp_gateway::mcp::tools::register_all_tools;
use trainercentral_mcp_gateway::server::state::ServerState;
use trainercentral_mcp_gateway::server::{run_server, RequestsLoggingLevel, ServerConfig};
use trainercentral_mcp_gateway::tc::{TrainerCentralApi, TrainerCentralClient};
use trainercentral_mcp_gateway::ToolRegistry;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Public base URL of this gateway, used in OAuth discovery documents.
    #[clap(long)]
    pub public_url: Option<String>,

    /// Base URL of the TrainerCentral REST API.
    #[clap(long)]
    pub tc_api_base_url: Option<String>,

    /// Base URL of the OAuth authorization server.
    #[clap(long)]
    pub auth_server_url: Option<String>,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Timeout in seconds for downstream API requests.
    #[clap(long, default_value_t = 30)]
    pub request_timeout_sec: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;

    let cli_config = CliConfig {
        port: cli_args.port,
        public_url: cli_args.public_url,
        tc_api_base_url: cli_args.tc_api_base_url,
        auth_server_url: cli_args.auth_server_url,
        logging_level: cli_args.logging_level,
        request_timeout_sec: cli_args.request_timeout_sec,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry);
    register_all_widgets(&mut registry);
    info!(
        "Registered {} tools and {} widget resources",
        registry.tool_count(),
        registry.widget_count()
    );

    let tc_api: Arc<dyn TrainerCentralApi> = Arc::new(TrainerCentralClient::new(
        &config.tc_api_base_url,
        config.request_timeout_sec,
    )?);
    info!("TrainerCentral API at {}", config.tc_api_base_url);

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level,
        port: config.port,
        public_url: config.public_url,
        auth_server_url: config.auth_server_url,
    };
    let version = format!("{}-{}", env!("APP_VERSION"), env!("GIT_HASH"));
    let state = ServerState::new(server_config, registry, tc_api, version);

    info!("Ready to serve at port {}!", config.port);
    run_server(state).await
}
