//! MCP Tool and Widget Registry
//!
//! Manages registration and lookup of tools and widget resources.
//! The registry is built once at startup and shared immutably.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::context::ToolContext;
use super::protocol::{ResourceDefinition, ToolDefinition};
use crate::tc::TcError;

// ============================================================================
// Tool Types
// ============================================================================

/// A tool failure surfaced to the caller as a success-shaped `isError`
/// result, so the LLM client can relay it conversationally.
#[derive(Debug, Clone)]
pub struct ToolError {
    pub message: String,
    /// Optional structured detail (e.g. partial state from a compound
    /// operation) appended to the error text.
    pub detail: Option<Value>,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: Value) -> Self {
        Self {
            message: message.into(),
            detail: Some(detail),
        }
    }
}

impl From<TcError> for ToolError {
    fn from(err: TcError) -> Self {
        ToolError::new(format!("Error: {}", err))
    }
}

/// Successful tool output, decided by the tool's declared contract rather
/// than inspected ad hoc at the call site.
pub enum ToolOutcome {
    /// Raw JSON value, serialized into a single text content block.
    Plain(Value),
    /// Widget-aware result: text passthrough for the conversation plus a
    /// model-visible structured summary for the rendering template.
    Widget { text: String, structured: Value },
}

/// Result type for tool execution
pub type ToolResult = Result<ToolOutcome, ToolError>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(ToolContext, Value) -> ToolFuture + Send + Sync>;

/// Declared output contract of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Plain,
    /// The result should be rendered by the widget at `template_uri`.
    Widget { template_uri: String },
}

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    /// Whether the dispatcher must see an `orgId` argument before invoking.
    pub requires_org: bool,
    pub output: ToolOutput,
    pub handler: ToolHandler,
}

// ============================================================================
// Widget Resources
// ============================================================================

/// A pre-built widget asset served via `resources/read` and over HTTP.
pub struct WidgetResource {
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub mime_type: String,
    pub html: String,
}

// ============================================================================
// Registry
// ============================================================================

/// Registry for MCP tools and widget resources
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    widgets: Vec<WidgetResource>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            widgets: Vec::new(),
        }
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Register a widget resource
    pub fn register_widget(&mut self, widget: WidgetResource) {
        self.widgets.push(widget);
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Descriptors for `tools/list`
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: tool.input_schema.clone(),
            })
            .collect()
    }

    /// Descriptors for `resources/list`
    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.widgets
            .iter()
            .map(|w| ResourceDefinition {
                uri: w.uri.clone(),
                name: w.name.clone(),
                description: w.description.clone(),
                mime_type: Some(w.mime_type.clone()),
            })
            .collect()
    }

    /// Find a widget by its `ui://` URI (exact match)
    pub fn find_widget(&self, uri: &str) -> Option<&WidgetResource> {
        self.widgets.iter().find(|w| w.uri == uri)
    }

    /// Find a widget by the final path segment of its URI
    /// (e.g. "tc-courses.html"), for the plain HTTP serving route.
    pub fn find_widget_by_filename(&self, filename: &str) -> Option<&WidgetResource> {
        self.widgets
            .iter()
            .find(|w| w.uri.rsplit('/').next() == Some(filename))
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Tool names, sorted, for the human-readable server descriptor.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder helpers
// ============================================================================

/// Builder for registering a tool
pub struct ToolBuilder {
    name: String,
    description: String,
    input_schema: Value,
    requires_org: bool,
    output: ToolOutput,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            requires_org: true,
            output: ToolOutput::Plain,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    /// The org-lookup tool is the only one that runs without an orgId.
    pub fn no_org_required(mut self) -> Self {
        self.requires_org = false;
        self
    }

    pub fn widget(mut self, template_uri: impl Into<String>) -> Self {
        self.output = ToolOutput::Widget {
            template_uri: template_uri.into(),
        };
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema,
            requires_org: self.requires_org,
            output: self.output,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}
