//! Widget asset wrapping.
//!
//! The JS bundles are embedded at compile time and wrapped in a minimal
//! HTML document on demand.

use super::{COURSES_WIDGET_URI, COURSE_DETAILS_WIDGET_URI};
use crate::mcp::registry::WidgetResource;

/// MIME type the ChatGPT widget sandbox expects
pub const SKYBRIDGE_MIME_TYPE: &str = "text/html+skybridge";

const COURSES_WIDGET_JS: &str = include_str!("../../../assets/widgets/tc-courses.js");
const COURSE_DETAILS_WIDGET_JS: &str =
    include_str!("../../../assets/widgets/tc-course-details.js");

/// Wrap a widget script in the HTML document shell the sandbox loads.
fn wrap_html(title: &str, script: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div id=\"root\"></div>\n<script>\n{}\n</script>\n</body>\n</html>\n",
        title, script
    )
}

pub fn courses_widget() -> WidgetResource {
    WidgetResource {
        uri: COURSES_WIDGET_URI.to_string(),
        name: "TrainerCentral Courses".to_string(),
        description: Some("Grid/list view of the organization's courses".to_string()),
        mime_type: SKYBRIDGE_MIME_TYPE.to_string(),
        html: wrap_html("Courses", COURSES_WIDGET_JS),
    }
}

pub fn course_details_widget() -> WidgetResource {
    WidgetResource {
        uri: COURSE_DETAILS_WIDGET_URI.to_string(),
        name: "TrainerCentral Course Details".to_string(),
        description: Some("Single course with outline and lessons".to_string()),
        mime_type: SKYBRIDGE_MIME_TYPE.to_string(),
        html: wrap_html("Course Details", COURSE_DETAILS_WIDGET_JS),
    }
}
