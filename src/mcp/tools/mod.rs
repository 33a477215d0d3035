//! MCP Tools
//!
//! Tool implementations wrapping the TrainerCentral API, one module per
//! resource family. Descriptors and handlers are registered together;
//! the two must be kept in sync by hand.

pub mod chapters;
pub mod courses;
pub mod lessons;
pub mod live_sessions;
pub mod portals;
pub mod workshops;

use super::registry::ToolRegistry;

/// Register all tools with the registry
pub fn register_all_tools(registry: &mut ToolRegistry) {
    portals::register_tools(registry);
    courses::register_tools(registry);
    chapters::register_tools(registry);
    lessons::register_tools(registry);
    workshops::register_tools(registry);
    live_sessions::register_tools(registry);
}
