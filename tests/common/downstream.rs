//! Stub TrainerCentral REST API
//!
//! A tiny axum server that records every request it receives and answers
//! with canned fixtures, so tests can assert both what the gateway sent
//! downstream and how it reshapes what came back.

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use super::constants::*;

/// One request as seen by the stub downstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub bearer: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct DownstreamHandle {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    fail_content_upload: Arc<AtomicBool>,
}

impl DownstreamHandle {
    /// All requests recorded so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request matching a path substring.
    pub fn last_request_to(&self, path_fragment: &str) -> Option<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.path.contains(path_fragment))
            .cloned()
    }

    /// Makes the next `createTextFile.json` calls answer 500.
    pub fn set_fail_content_upload(&self, fail: bool) {
        self.fail_content_upload.store(fail, Ordering::SeqCst);
    }
}

/// Spawns the stub on a random port, returns its base URL and handle.
pub async fn spawn_downstream() -> (String, DownstreamHandle) {
    let handle = DownstreamHandle::default();

    let app = Router::new()
        .fallback(record_and_respond)
        .with_state(handle.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub downstream");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub downstream failed");
    });

    (format!("http://127.0.0.1:{}", port), handle)
}

async fn record_and_respond(State(handle): State<DownstreamHandle>, request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    let bytes: Bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    handle.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query,
        bearer,
        body,
    });

    if path.ends_with("/createTextFile.json") && handle.fail_content_upload.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable").into_response();
    }

    Json(canned_response(&method, &path)).into_response()
}

fn canned_response(method: &str, path: &str) -> Value {
    if path.ends_with("/portals.json") {
        return portals_fixture();
    }
    if path.ends_with("/courses.json") && method == "GET" {
        return courses_fixture();
    }
    if path.ends_with("/courses.json") && method == "POST" {
        return json!({"course": {"id": "course-new", "publishStatus": "draft"}});
    }
    if path.contains("/courses/") && method == "GET" {
        return json!({
            "course": {
                "id": COURSE_1_ID,
                "courseName": "Intro to Baking",
                "publishStatus": "published",
                "courseDescription": "Bread from first principles",
            }
        });
    }
    if path.ends_with("/sessions.json") && method == "POST" {
        return json!({"session": {"id": CREATED_SESSION_ID, "name": "created"}});
    }
    if path.ends_with("/createTextFile.json") {
        return json!({"file": {"name": "Content", "sessionId": CREATED_SESSION_ID}});
    }
    if path.contains("/course/") && path.ends_with("/sessions.json") {
        return json!({"sessions": [{"id": CREATED_SESSION_ID, "name": "Lesson 1"}]});
    }
    if path.ends_with("/upcomingSessions.json") {
        return json!({"sessions": [{"id": "live-1", "name": "Office hours"}]});
    }
    if path.ends_with("/talks.json") && method == "GET" {
        return json!({"talks": [{"id": "talk-1", "name": "Kickoff"}]});
    }
    if path.ends_with("/talks.json") && method == "POST" {
        return json!({"talk": {"id": "talk-new"}});
    }
    // Everything else (updates, deletes, memberships) answers generically.
    json!({"status": "ok"})
}

fn portals_fixture() -> Value {
    json!({
        "portals": [
            {"orgId": TEST_ORG_ID, "name": "My Academy", "isDefault": true},
            {"orgId": OTHER_ORG_ID, "name": "Second Academy", "isDefault": false},
        ]
    })
}

fn courses_fixture() -> Value {
    let courses: Vec<Value> = (1..=FIXTURE_COURSE_COUNT)
        .map(|i| {
            json!({
                "id": format!("course-{}", i),
                "courseName": format!("Course {}", i),
                "publishStatus": if i % 2 == 0 { "published" } else { "draft" },
            })
        })
        .collect();
    json!({
        "courses": courses,
        "meta": {"totalCourseCount": FIXTURE_COURSE_COUNT},
    })
}
