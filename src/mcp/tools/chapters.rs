//! Chapter (section) Tools

use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{
    RegisteredTool, ToolBuilder, ToolError, ToolOutcome, ToolRegistry, ToolResult,
};

/// Register chapter tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(create_chapter_tool());
    registry.register_tool(update_chapter_tool());
    registry.register_tool(delete_chapter_tool());
}

fn invalid_args(e: serde_json::Error) -> ToolError {
    ToolError::new(format!("Invalid arguments: {}", e))
}

#[derive(Debug, Deserialize)]
struct CreateChapterParams {
    section_data: Value,
}

fn create_chapter_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_chapter")
        .description("Create chapter. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "section_data": {"type": "object"}
            },
            "required": ["orgId", "section_data"]
        }))
        .build(create_chapter_handler)
}

async fn create_chapter_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateChapterParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .create_chapter(ctx.org()?, &ctx.access_token, params.section_data)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[derive(Debug, Deserialize)]
struct UpdateChapterParams {
    #[serde(rename = "courseId")]
    course_id: String,
    section_id: String,
    updates: Value,
}

fn update_chapter_tool() -> RegisteredTool {
    ToolBuilder::new("tc_update_chapter")
        .description("Update chapter. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"},
                "section_id": {"type": "string"},
                "updates": {"type": "object"}
            },
            "required": ["orgId", "courseId", "section_id", "updates"]
        }))
        .build(update_chapter_handler)
}

async fn update_chapter_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateChapterParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .update_chapter(
            ctx.org()?,
            &ctx.access_token,
            &params.course_id,
            &params.section_id,
            params.updates,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[derive(Debug, Deserialize)]
struct DeleteChapterParams {
    #[serde(rename = "courseId")]
    course_id: String,
    section_id: String,
}

fn delete_chapter_tool() -> RegisteredTool {
    ToolBuilder::new("tc_delete_chapter")
        .description("Delete chapter. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"},
                "section_id": {"type": "string"}
            },
            "required": ["orgId", "courseId", "section_id"]
        }))
        .build(delete_chapter_handler)
}

async fn delete_chapter_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DeleteChapterParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .delete_chapter(
            ctx.org()?,
            &ctx.access_token,
            &params.course_id,
            &params.section_id,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}
