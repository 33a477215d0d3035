//! MCP Widget Resources
//!
//! Pre-built HTML widgets the client can render next to tool results.
//! Served both through `resources/read` and over plain HTTP.

mod widgets;

pub use widgets::SKYBRIDGE_MIME_TYPE;

use super::registry::ToolRegistry;

/// URI of the courses list widget, referenced by `tc_list_courses`.
pub const COURSES_WIDGET_URI: &str = "ui://widget/tc-courses.html";

/// URI of the course details widget, referenced by `tc_get_course`.
pub const COURSE_DETAILS_WIDGET_URI: &str = "ui://widget/tc-course-details.html";

/// Register all widget resources with the registry
pub fn register_all_widgets(registry: &mut ToolRegistry) {
    registry.register_widget(widgets::courses_widget());
    registry.register_widget(widgets::course_details_widget());
}
