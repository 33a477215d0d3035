//! Course Live Session Tools
//!
//! Live workshops scheduled inside a course. Unlike the global workshop
//! tools, these accept human-readable schedule strings and convert them
//! to epoch milliseconds before transmission.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{
    RegisteredTool, ToolBuilder, ToolError, ToolOutcome, ToolRegistry, ToolResult,
};
use crate::tc::convert_schedule_time;

/// Register course live session tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(create_live_session_tool());
    registry.register_tool(list_live_sessions_tool());
    registry.register_tool(delete_live_session_tool());
    registry.register_tool(invite_learner_tool());
}

fn invalid_args(e: serde_json::Error) -> ToolError {
    ToolError::new(format!("Invalid arguments: {}", e))
}

// ============================================================================
// tc_create_course_live_session
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateLiveSessionParams {
    #[serde(rename = "courseId")]
    course_id: String,
    name: String,
    description_html: String,
    start_time: String,
    end_time: String,
}

fn create_live_session_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_course_live_session")
        .description("Create course live session. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"},
                "name": {"type": "string"},
                "description_html": {"type": "string"},
                "start_time": {"type": "string", "description": "DD-MM-YYYY HH:MMAM/PM"},
                "end_time": {"type": "string", "description": "DD-MM-YYYY HH:MMAM/PM"}
            },
            "required": ["orgId", "courseId", "name", "description_html", "start_time", "end_time"]
        }))
        .build(create_live_session_handler)
}

async fn create_live_session_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateLiveSessionParams = serde_json::from_value(params).map_err(invalid_args)?;

    let start_ms = convert_schedule_time(&params.start_time)?;
    let end_ms = convert_schedule_time(&params.end_time)?;
    if end_ms <= start_ms {
        return Err(ToolError::new(format!(
            "end_time ({}) must be after start_time ({})",
            params.end_time, params.start_time
        )));
    }

    let session = json!({
        "name": params.name,
        "description": params.description_html,
        "courseId": params.course_id,
        "deliveryMode": 3,
        "scheduledTime": start_ms,
        "scheduledEndTime": end_ms,
        "durationTime": end_ms - start_ms,
    });

    let response = ctx
        .api
        .create_session(ctx.org()?, &ctx.access_token, session)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_list_course_live_sessions
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListLiveSessionsParams {
    #[serde(default = "default_filter_type")]
    filter_type: u32,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    si: u32,
}

fn default_filter_type() -> u32 {
    5
}

fn default_limit() -> u32 {
    50
}

fn list_live_sessions_tool() -> RegisteredTool {
    ToolBuilder::new("tc_list_course_live_sessions")
        .description("List course live sessions. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "filter_type": {"type": "integer"},
                "limit": {"type": "integer"},
                "si": {"type": "integer"}
            },
            "required": ["orgId"]
        }))
        .build(list_live_sessions_handler)
}

async fn list_live_sessions_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListLiveSessionsParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .list_upcoming_sessions(
            ctx.org()?,
            &ctx.access_token,
            params.filter_type,
            params.limit,
            params.si,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_delete_course_live_session
// ============================================================================

#[derive(Debug, Deserialize)]
struct DeleteLiveSessionParams {
    session_id: String,
}

fn delete_live_session_tool() -> RegisteredTool {
    ToolBuilder::new("tc_delete_course_live_session")
        .description("Delete course live session. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_id": {"type": "string"}
            },
            "required": ["orgId", "session_id"]
        }))
        .build(delete_live_session_handler)
}

async fn delete_live_session_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DeleteLiveSessionParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .delete_session(ctx.org()?, &ctx.access_token, &params.session_id)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// invite_learner_to_course_or_course_live_session
// ============================================================================

#[derive(Debug, Deserialize)]
struct InviteLearnerParams {
    email: String,
    first_name: String,
    last_name: String,
    #[serde(rename = "courseId", default)]
    course_id: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

fn invite_learner_tool() -> RegisteredTool {
    ToolBuilder::new("invite_learner_to_course_or_course_live_session")
        .description("Invite learner. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "email": {"type": "string"},
                "first_name": {"type": "string"},
                "last_name": {"type": "string"},
                "courseId": {"type": "string"},
                "session_id": {"type": "string"}
            },
            "required": ["orgId", "email", "first_name", "last_name"]
        }))
        .build(invite_learner_handler)
}

async fn invite_learner_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: InviteLearnerParams = serde_json::from_value(params).map_err(invalid_args)?;

    if params.course_id.is_none() && params.session_id.is_none() {
        return Err(ToolError::new(
            "Either courseId or session_id must be provided to invite a learner",
        ));
    }

    let mut attendee = json!({
        "email": params.email,
        "firstName": params.first_name,
        "lastName": params.last_name,
        "isAccessGranted": true,
    });
    if let Some(course_id) = &params.course_id {
        attendee["courseId"] = json!(course_id);
    }
    if let Some(session_id) = &params.session_id {
        attendee["sessionId"] = json!(session_id);
    }

    let response = ctx
        .api
        .add_course_attendee(ctx.org()?, &ctx.access_token, attendee)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_learner_requires_a_target() {
        let params: InviteLearnerParams = serde_json::from_value(json!({
            "email": "a@b.c",
            "first_name": "A",
            "last_name": "B"
        }))
        .unwrap();
        assert!(params.course_id.is_none());
        assert!(params.session_id.is_none());
    }

    #[test]
    fn test_create_params_shape() {
        let params: CreateLiveSessionParams = serde_json::from_value(json!({
            "courseId": "c1",
            "name": "Office hours",
            "description_html": "<p>Q&A</p>",
            "start_time": "05-12-2025 3:00PM",
            "end_time": "05-12-2025 4:00PM"
        }))
        .unwrap();
        assert_eq!(params.course_id, "c1");
    }
}
