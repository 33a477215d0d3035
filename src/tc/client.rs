//! HTTP client for the TrainerCentral REST API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::error::TcError;
use super::AccessToken;

/// Operations the gateway performs against TrainerCentral.
///
/// Kept as a trait so tools can be exercised against a stub in tests.
/// Every method returns the parsed JSON response body verbatim; reshaping
/// happens in the tool layer, not here.
#[async_trait]
pub trait TrainerCentralApi: Send + Sync {
    /// List the portals (organizations) the token grants access to.
    /// The only unscoped call; everything else takes an org id.
    async fn get_portals(&self, token: &AccessToken) -> Result<Value, TcError>;

    // Courses
    async fn create_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course: Value,
    ) -> Result<Value, TcError>;
    async fn get_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError>;
    async fn list_courses(
        &self,
        org_id: &str,
        token: &AccessToken,
        limit: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Value, TcError>;
    async fn update_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        updates: Value,
    ) -> Result<Value, TcError>;
    async fn delete_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError>;

    // Chapters (sections)
    async fn create_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        section: Value,
    ) -> Result<Value, TcError>;
    async fn update_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        section_id: &str,
        updates: Value,
    ) -> Result<Value, TcError>;
    async fn delete_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        section_id: &str,
    ) -> Result<Value, TcError>;

    // Sessions (lessons, workshops, and course live sessions share these)
    async fn create_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session: Value,
    ) -> Result<Value, TcError>;
    async fn update_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
        updates: Value,
    ) -> Result<Value, TcError>;
    async fn delete_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
    ) -> Result<Value, TcError>;
    async fn upload_session_content(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
        content_html: &str,
        filename: &str,
    ) -> Result<Value, TcError>;
    async fn get_course_sessions(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError>;
    async fn list_upcoming_sessions(
        &self,
        org_id: &str,
        token: &AccessToken,
        filter_type: u32,
        limit: u32,
        start_index: u32,
    ) -> Result<Value, TcError>;

    // Workshop occurrences (talks)
    async fn create_talk(
        &self,
        org_id: &str,
        token: &AccessToken,
        talk: Value,
    ) -> Result<Value, TcError>;
    async fn update_talk(
        &self,
        org_id: &str,
        token: &AccessToken,
        talk_id: &str,
        updates: Value,
    ) -> Result<Value, TcError>;
    async fn list_talks(
        &self,
        org_id: &str,
        token: &AccessToken,
        filter_type: u32,
        limit: u32,
        start_index: u32,
    ) -> Result<Value, TcError>;

    // Membership
    async fn add_session_members(
        &self,
        org_id: &str,
        token: &AccessToken,
        members: Value,
    ) -> Result<Value, TcError>;
    async fn add_course_attendee(
        &self,
        org_id: &str,
        token: &AccessToken,
        attendee: Value,
    ) -> Result<Value, TcError>;
}

/// Reqwest-backed implementation of [`TrainerCentralApi`].
pub struct TrainerCentralClient {
    client: reqwest::Client,
    base_url: String,
}

impl TrainerCentralClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - TrainerCentral base URL (e.g. "https://myacademy.trainercentral.in")
    /// * `timeout_sec` - Per-request timeout in seconds
    pub fn new(base_url: impl Into<String>, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Get the base URL of the TrainerCentral deployment.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn org_url(&self, org_id: &str, path: &str) -> String {
        format!("{}/api/v4/{}/{}", self.base_url, org_id, path)
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        token: &AccessToken,
    ) -> Result<Value, TcError> {
        let response = request.bearer_auth(token.secret()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("TrainerCentral response: status={} bytes={}", status, body.len());

        if !status.is_success() {
            return Err(TcError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            // Some delete endpoints answer 200 with an empty body.
            return Ok(json!({}));
        }

        serde_json::from_str(&body)
            .map_err(|e| TcError::InvalidResponse(format!("{} (body: {})", e, truncate(&body, 256))))
    }

    async fn get(&self, url: &str, token: &AccessToken) -> Result<Value, TcError> {
        debug!("GET {}", url);
        self.execute(self.client.get(url), token).await
    }

    async fn post(&self, url: &str, token: &AccessToken, body: Value) -> Result<Value, TcError> {
        debug!("POST {}", url);
        self.execute(self.client.post(url).json(&body), token).await
    }

    async fn put(&self, url: &str, token: &AccessToken, body: Value) -> Result<Value, TcError> {
        debug!("PUT {}", url);
        self.execute(self.client.put(url).json(&body), token).await
    }

    async fn delete(&self, url: &str, token: &AccessToken) -> Result<Value, TcError> {
        debug!("DELETE {}", url);
        self.execute(self.client.delete(url), token).await
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[async_trait]
impl TrainerCentralApi for TrainerCentralClient {
    async fn get_portals(&self, token: &AccessToken) -> Result<Value, TcError> {
        let url = format!("{}/api/v4/portals.json", self.base_url);
        self.get(&url, token).await
    }

    async fn create_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "courses.json");
        self.post(&url, token, json!({ "course": course })).await
    }

    async fn get_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("courses/{}.json", course_id));
        self.get(&url, token).await
    }

    async fn list_courses(
        &self,
        org_id: &str,
        token: &AccessToken,
        limit: Option<u32>,
        start_index: Option<u32>,
    ) -> Result<Value, TcError> {
        let mut url = self.org_url(org_id, "courses.json");
        let mut params = Vec::new();
        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }
        if let Some(si) = start_index {
            params.push(format!("si={}", si));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }
        self.get(&url, token).await
    }

    async fn update_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        updates: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("courses/{}.json", course_id));
        self.put(&url, token, json!({ "course": updates })).await
    }

    async fn delete_course(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("courses/{}.json", course_id));
        self.delete(&url, token).await
    }

    async fn create_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        section: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "sections.json");
        self.post(&url, token, json!({ "section": section })).await
    }

    async fn update_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        section_id: &str,
        updates: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(
            org_id,
            &format!("course/{}/sections/{}.json", course_id, section_id),
        );
        self.put(&url, token, json!({ "section": updates })).await
    }

    async fn delete_chapter(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
        section_id: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(
            org_id,
            &format!("course/{}/sections/{}.json", course_id, section_id),
        );
        self.delete(&url, token).await
    }

    async fn create_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "sessions.json");
        self.post(&url, token, json!({ "session": session })).await
    }

    async fn update_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
        updates: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("sessions/{}.json", session_id));
        self.put(&url, token, json!({ "session": updates })).await
    }

    async fn delete_session(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("sessions/{}.json", session_id));
        self.delete(&url, token).await
    }

    async fn upload_session_content(
        &self,
        org_id: &str,
        token: &AccessToken,
        session_id: &str,
        content_html: &str,
        filename: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("session/{}/createTextFile.json", session_id));
        let body = json!({
            "richTextContent": content_html,
            "filename": filename,
        });
        self.post(&url, token, body).await
    }

    async fn get_course_sessions(
        &self,
        org_id: &str,
        token: &AccessToken,
        course_id: &str,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("course/{}/sessions.json", course_id));
        self.get(&url, token).await
    }

    async fn list_upcoming_sessions(
        &self,
        org_id: &str,
        token: &AccessToken,
        filter_type: u32,
        limit: u32,
        start_index: u32,
    ) -> Result<Value, TcError> {
        let url = self.org_url(
            org_id,
            &format!(
                "upcomingSessions.json?filterType={}&limit={}&si={}",
                filter_type, limit, start_index
            ),
        );
        self.get(&url, token).await
    }

    async fn create_talk(
        &self,
        org_id: &str,
        token: &AccessToken,
        talk: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "talks.json");
        self.post(&url, token, json!({ "talk": talk })).await
    }

    async fn update_talk(
        &self,
        org_id: &str,
        token: &AccessToken,
        talk_id: &str,
        updates: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, &format!("talks/{}.json", talk_id));
        self.put(&url, token, json!({ "talk": updates })).await
    }

    async fn list_talks(
        &self,
        org_id: &str,
        token: &AccessToken,
        filter_type: u32,
        limit: u32,
        start_index: u32,
    ) -> Result<Value, TcError> {
        let url = self.org_url(
            org_id,
            &format!(
                "talks.json?filter={}&limit={}&si={}",
                filter_type, limit, start_index
            ),
        );
        self.get(&url, token).await
    }

    async fn add_session_members(
        &self,
        org_id: &str,
        token: &AccessToken,
        members: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "sessionMembers.json");
        self.post(&url, token, json!({ "sessionMembers": members }))
            .await
    }

    async fn add_course_attendee(
        &self,
        org_id: &str,
        token: &AccessToken,
        attendee: Value,
    ) -> Result<Value, TcError> {
        let url = self.org_url(org_id, "addCourseAttendee.json");
        self.post(&url, token, json!({ "courseAttendee": attendee }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = TrainerCentralClient::new("https://academy.example.in", 30).unwrap();
        assert_eq!(client.base_url(), "https://academy.example.in");
    }

    #[test]
    fn test_trailing_slash_removal() {
        let client = TrainerCentralClient::new("https://academy.example.in/", 30).unwrap();
        assert_eq!(client.base_url(), "https://academy.example.in");
    }

    #[test]
    fn test_org_url_layout() {
        let client = TrainerCentralClient::new("https://academy.example.in", 30).unwrap();
        assert_eq!(
            client.org_url("60058756004", "courses.json"),
            "https://academy.example.in/api/v4/60058756004/courses.json"
        );
        assert_eq!(
            client.org_url("60058756004", "course/c1/sections/s1.json"),
            "https://academy.example.in/api/v4/60058756004/course/c1/sections/s1.json"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
