//! TrainerCentral MCP Gateway Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod mcp;
pub mod server;
pub mod tc;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use mcp::{ToolBuilder, ToolError, ToolOutcome, ToolRegistry};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
pub use tc::{AccessToken, TrainerCentralApi, TrainerCentralClient};
