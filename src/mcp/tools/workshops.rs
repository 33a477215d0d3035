//! Global Live Workshop Tools
//!
//! Workshops are sessions with deliveryMode 3, not tied to any course.
//! Occurrences (talks) hang off a parent workshop session. Scheduled
//! times in these payloads are already epoch milliseconds; the caller is
//! expected to have built them via the documented session_data contract.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{
    RegisteredTool, ToolBuilder, ToolError, ToolOutcome, ToolRegistry, ToolResult,
};

/// Register workshop tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(create_workshop_tool());
    registry.register_tool(update_workshop_tool());
    registry.register_tool(create_occurrence_tool());
    registry.register_tool(update_occurrence_tool());
    registry.register_tool(list_workshops_tool());
    registry.register_tool(invite_user_tool());
}

fn invalid_args(e: serde_json::Error) -> ToolError {
    ToolError::new(format!("Invalid arguments: {}", e))
}

// ============================================================================
// tc_create_workshop / tc_update_workshop
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateWorkshopParams {
    session_data: Value,
}

fn create_workshop_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_workshop")
        .description("Create workshop. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_data": {"type": "object"}
            },
            "required": ["orgId", "session_data"]
        }))
        .build(create_workshop_handler)
}

async fn create_workshop_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateWorkshopParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .create_session(ctx.org()?, &ctx.access_token, params.session_data)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[derive(Debug, Deserialize)]
struct UpdateWorkshopParams {
    session_id: String,
    updates: Value,
}

fn update_workshop_tool() -> RegisteredTool {
    ToolBuilder::new("tc_update_workshop")
        .description("Update workshop. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_id": {"type": "string"},
                "updates": {"type": "object"}
            },
            "required": ["orgId", "session_id", "updates"]
        }))
        .build(update_workshop_handler)
}

async fn update_workshop_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateWorkshopParams = serde_json::from_value(params).map_err(invalid_args)?;

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

// ============================================================================
// tc_create_workshop_occurrence / tc_update_workshop_occurrence
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateOccurrenceParams {
    talk_data: Value,
}

fn create_occurrence_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_workshop_occurrence")
        .description("Create workshop occurrence. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "talk_data": {"type": "object"}
            },
            "required": ["orgId", "talk_data"]
        }))
        .build(create_occurrence_handler)
}

async fn create_occurrence_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateOccurrenceParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .create_talk(ctx.org()?, &ctx.access_token, params.talk_data)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

#[derive(Debug, Deserialize)]
struct UpdateOccurrenceParams {
    talk_id: String,
    updates: Value,
}

fn update_occurrence_tool() -> RegisteredTool {
    ToolBuilder::new("tc_update_workshop_occurrence")
        .description("Update workshop occurrence. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "talk_id": {"type": "string"},
                "updates": {"type": "object"}
            },
            "required": ["orgId", "talk_id", "updates"]
        }))
        .build(update_occurrence_handler)
}

async fn update_occurrence_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateOccurrenceParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .update_talk(
            ctx.org()?,
            &ctx.access_token,
            &params.talk_id,
            params.updates,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_list_all_global_workshops
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListWorkshopsParams {
    #[serde(default = "default_filter_type")]
    filter_type: u32,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    si: u32,
}

// 5 = all upcoming (admin view); 1 = caller's own upcoming.
fn default_filter_type() -> u32 {
    5
}

fn default_limit() -> u32 {
    50
}

fn list_workshops_tool() -> RegisteredTool {
    ToolBuilder::new("tc_list_all_global_workshops")
        .description("List workshops. Requires orgId.")
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
        .build(list_workshops_handler)
}

async fn list_workshops_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListWorkshopsParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .list_talks(
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
// tc_invite_user_to_session
// ============================================================================

#[derive(Debug, Deserialize)]
struct InviteUserParams {
    session_id: String,
    email: String,
    #[serde(default = "default_role")]
    role: u32,
    #[serde(default = "default_source")]
    source: u32,
}

// 3 = attendee
fn default_role() -> u32 {
    3
}

fn default_source() -> u32 {
    1
}

fn invite_user_tool() -> RegisteredTool {
    ToolBuilder::new("tc_invite_user_to_session")
        .description("Invite user. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "session_id": {"type": "string"},
                "email": {"type": "string"},
                "role": {"type": "integer"},
                "source": {"type": "integer"}
            },
            "required": ["orgId", "session_id", "email"]
        }))
        .build(invite_user_handler)
}

async fn invite_user_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: InviteUserParams = serde_json::from_value(params).map_err(invalid_args)?;

    let members = json!([{
        "emailId": params.email,
        "sessionId": params.session_id,
        "role": params.role,
        "source": params.source,
    }]);

    let response = ctx
        .api
        .add_session_members(ctx.org()?, &ctx.access_token, members)
        .await?;
    Ok(ToolOutcome::Plain(response))
}
