//! Model Context Protocol surface: JSON-RPC types, the tool registry,
//! the HTTP dispatcher, tool implementations, and widget resources.

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod resources;
pub mod tools;

pub use context::ToolContext;
pub use handler::mcp_endpoint;
pub use registry::{ToolBuilder, ToolError, ToolOutcome, ToolRegistry};
