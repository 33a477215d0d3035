//! MCP Tool Execution Context
//!
//! Carries the per-request credentials and the downstream API handle
//! into tool implementations. Nothing here outlives the request.

use std::sync::Arc;

use crate::tc::{AccessToken, TrainerCentralApi};

use super::registry::ToolError;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Bearer token forwarded from the caller (redacted in logs)
    pub access_token: AccessToken,

    /// Organization id supplied by the caller; `None` only for the
    /// org-lookup tool
    pub org_id: Option<String>,

    /// Downstream TrainerCentral API
    pub api: Arc<dyn TrainerCentralApi>,
}

impl ToolContext {
    /// The org id, for tools that require one. The dispatcher enforces its
    /// presence before invoking such tools, so a failure here indicates a
    /// registration mistake rather than a caller mistake.
    pub fn org(&self) -> Result<&str, ToolError> {
        self.org_id
            .as_deref()
            .ok_or_else(|| ToolError::new("orgId required. Call tc_get_org_id() first."))
    }
}
