//! Lesson (session) Tools
//!
//! Lesson creation is a two-step compound operation: create the session,
//! then upload its rich-text content. If the second step fails, the
//! partial state (the created session id) is surfaced explicitly instead
//! of being silently discarded.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{
    RegisteredTool, ToolBuilder, ToolError, ToolOutcome, ToolRegistry, ToolResult,
};

/// Register lesson tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(create_lesson_tool());
    registry.register_tool(get_course_lessons_tool());
    registry.register_tool(update_lesson_tool());
    registry.register_tool(delete_lesson_tool());
}

fn invalid_args(e: serde_json::Error) -> ToolError {
    ToolError::new(format!("Invalid arguments: {}", e))
}

// ============================================================================
// tc_create_lesson
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateLessonParams {
    session_data: Value,
    content_html: String,
    #[serde(default = "default_content_filename")]
    content_filename: String,
}

fn default_content_filename() -> String {
    "Content".to_string()
}

fn create_lesson_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_lesson")
        .description("Create lesson. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_data": {"type": "object"},
                "content_html": {"type": "string"},
                "content_filename": {"type": "string"}
            },
            "required": ["orgId", "session_data", "content_html"]
        }))
        .build(create_lesson_handler)
}

async fn create_lesson_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateLessonParams = serde_json::from_value(params).map_err(invalid_args)?;
    let org_id = ctx.org()?;

    // Step 1: create the session container
    let create_resp = ctx
        .api
        .create_session(org_id, &ctx.access_token, params.session_data)
        .await?;

    let session_id = extract_session_id(&create_resp).ok_or_else(|| {
        ToolError::with_detail(
            "Lesson created but no sessionId found in the response",
            json!({ "lesson": create_resp }),
        )
    })?;

    // Step 2: upload the rich-text content
    let content_resp = ctx
        .api
        .upload_session_content(
            org_id,
            &ctx.access_token,
            &session_id,
            &params.content_html,
            &params.content_filename,
        )
        .await;

    match content_resp {
        Ok(content) => Ok(ToolOutcome::Plain(json!({
            "lesson": create_resp,
            "content": content,
        }))),
        Err(e) => {
            warn!(
                "Lesson {} created but content upload failed: {}",
                session_id, e
            );
            Err(ToolError::with_detail(
                format!(
                    "Lesson was created (sessionId {}) but the content upload failed: {}",
                    session_id, e
                ),
                json!({
                    "lesson": create_resp,
                    "sessionId": session_id,
                }),
            ))
        }
    }
}

/// The created session id arrives under `session.id` or `session.sessionId`,
/// as a string or a number.
fn extract_session_id(response: &Value) -> Option<String> {
    let session = response.get("session")?;
    let id = session.get("id").or_else(|| session.get("sessionId"))?;
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// tc_get_course_lessons
// ============================================================================

#[derive(Debug, Deserialize)]
struct GetCourseLessonsParams {
    #[serde(rename = "courseId")]
    course_id: String,
}

fn get_course_lessons_tool() -> RegisteredTool {
    ToolBuilder::new("tc_get_course_lessons")
        .description(
            "Get all lessons (sessions) for a specific course. Useful before creating \
             tests or understanding course structure.",
        )
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string", "description": "Organization ID from tc_get_org_id"},
                "courseId": {"type": "string", "description": "Course ID"}
            },
            "required": ["orgId", "courseId"]
        }))
        .build(get_course_lessons_handler)
}

async fn get_course_lessons_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: GetCourseLessonsParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .get_course_sessions(ctx.org()?, &ctx.access_token, &params.course_id)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_update_lesson / tc_delete_lesson
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpdateLessonParams {
    session_id: String,
    updates: Value,
}

fn update_lesson_tool() -> RegisteredTool {
    ToolBuilder::new("tc_update_lesson")
        .description("Update lesson. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_id": {"type": "string"},
                "updates": {"type": "object"}
            },
            "required": ["orgId", "session_id", "updates"]
        }))
        .build(update_lesson_handler)
}

async fn update_lesson_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateLessonParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .update_session(
            ctx.org()?,
            &ctx.access_token,
            &params.session_id,
            params.updates,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[derive(Debug, Deserialize)]
struct DeleteLessonParams {
    session_id: String,
}

fn delete_lesson_tool() -> RegisteredTool {
    ToolBuilder::new("tc_delete_lesson")
        .description("Delete lesson. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_id": {"type": "string"}
            },
            "required": ["orgId", "session_id"]
        }))
        .build(delete_lesson_handler)
}

async fn delete_lesson_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DeleteLessonParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .delete_session(ctx.org()?, &ctx.access_token, &params.session_id)
        .await?;
    Ok(ToolOutcome::Plain(response))
}
