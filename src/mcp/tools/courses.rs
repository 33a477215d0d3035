//! Course Tools
//!
//! Course CRUD against TrainerCentral. List and get are widget-aware:
//! they carry a structured summary and an output template for rich
//! rendering in the client.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::mcp::context::ToolContext;
use crate::mcp::registry::{
    RegisteredTool, ToolBuilder, ToolError, ToolOutcome, ToolRegistry, ToolResult,
};
use crate::mcp::resources::{COURSES_WIDGET_URI, COURSE_DETAILS_WIDGET_URI};

/// Register course tools with the registry
pub fn register_tools(registry: &mut ToolRegistry) {
    registry.register_tool(create_course_tool());
    registry.register_tool(get_course_tool());
    registry.register_tool(list_courses_tool());
    registry.register_tool(update_course_tool());
    registry.register_tool(delete_course_tool());
}

fn invalid_args(e: serde_json::Error) -> ToolError {
    ToolError::new(format!("Invalid arguments: {}", e))
}

// ============================================================================
// tc_create_course
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreateCourseParams {
    course_data: Value,
}

fn create_course_tool() -> RegisteredTool {
    ToolBuilder::new("tc_create_course")
        .description("Create course. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "course_data": {"type": "object"}
            },
            "required": ["orgId", "course_data"]
        }))
        .build(create_course_handler)
}

async fn create_course_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: CreateCourseParams = serde_json::from_value(params).map_err(invalid_args)?;

    // The API rejects an empty courseCategories array.
    let mut course = params.course_data;
    if let Some(obj) = course.as_object_mut() {
        let empty_categories = obj
            .get("courseCategories")
            .and_then(Value::as_array)
            .is_some_and(|a| a.is_empty());
        if empty_categories {
            obj.remove("courseCategories");
        }
    }

    let response = ctx
        .api
        .create_course(ctx.org()?, &ctx.access_token, course)
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_get_course
// ============================================================================

#[derive(Debug, Deserialize)]
struct GetCourseParams {
    #[serde(rename = "courseId")]
    course_id: String,
}

fn get_course_tool() -> RegisteredTool {
    ToolBuilder::new("tc_get_course")
        .description("Get course. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"}
            },
            "required": ["orgId", "courseId"]
        }))
        .widget(COURSE_DETAILS_WIDGET_URI)
        .build(get_course_handler)
}

async fn get_course_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: GetCourseParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .get_course(ctx.org()?, &ctx.access_token, &params.course_id)
        .await?;

    let text = serde_json::to_string_pretty(&response)
        .map_err(|e| ToolError::new(format!("Failed to serialize response: {}", e)))?;
    Ok(ToolOutcome::Widget {
        text,
        structured: response,
    })
}

// ============================================================================
// tc_list_courses
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListCoursesParams {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    si: Option<u32>,
}

fn list_courses_tool() -> RegisteredTool {
    ToolBuilder::new("tc_list_courses")
        .description("List courses. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "limit": {"type": "integer"},
                "si": {"type": "integer"}
            },
            "required": ["orgId"]
        }))
        .widget(COURSES_WIDGET_URI)
        .build(list_courses_handler)
}

async fn list_courses_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListCoursesParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .list_courses(ctx.org()?, &ctx.access_token, params.limit, params.si)
        .await?;

    let structured = summarize_course_list(&response);
    let text = serde_json::to_string_pretty(&response)
        .map_err(|e| ToolError::new(format!("Failed to serialize response: {}", e)))?;
    Ok(ToolOutcome::Widget { text, structured })
}

/// Summary the courses widget renders: the course list plus publish-status
/// counts. The raw response still travels unmodified in the text content.
fn summarize_course_list(response: &Value) -> Value {
    let courses = response
        .get("courses")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let published = courses
        .iter()
        .filter(|c| {
            c.get("publishStatus")
                .and_then(Value::as_str)
                .is_some_and(|s| s.eq_ignore_ascii_case("published"))
        })
        .count();
    let total_count = response
        .get("meta")
        .and_then(|m| m.get("totalCourseCount"))
        .and_then(Value::as_u64)
        .unwrap_or(courses.len() as u64);

    json!({
        "courses": courses,
        "totalCourseCount": total_count,
        "stats": {
            "total": courses.len(),
            "published": published,
            "draft": courses.len() - published,
        }
    })
}

// ============================================================================
// tc_update_course
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpdateCourseParams {
    #[serde(rename = "courseId")]
    course_id: String,
    updates: Value,
}

fn update_course_tool() -> RegisteredTool {
    ToolBuilder::new("tc_update_course")
        .description("Update course. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"},
                "updates": {"type": "object"}
            },
            "required": ["orgId", "courseId", "updates"]
        }))
        .build(update_course_handler)
}

async fn update_course_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateCourseParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .update_course(
            ctx.org()?,
            &ctx.access_token,
            &params.course_id,
            params.updates,
        )
        .await?;
    Ok(ToolOutcome::Plain(response))
}

// ============================================================================
// tc_delete_course
// ============================================================================

fn delete_course_tool() -> RegisteredTool {
    ToolBuilder::new("tc_delete_course")
        .description("Delete course. Requires orgId.")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "orgId": {"type": "string"},
                "courseId": {"type": "string"}
            },
            "required": ["orgId", "courseId"]
        }))
        .build(delete_course_handler)
}

async fn delete_course_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: GetCourseParams = serde_json::from_value(params).map_err(invalid_args)?;

    let response = ctx
        .api
        .delete_course(ctx.org()?, &ctx.access_token, &params.course_id)
        .await?;
    Ok(ToolOutcome::Plain(response))
}
