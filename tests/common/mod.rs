//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestClient, TestServer, TEST_TOKEN};
//!
//! #[tokio::test]
//! async fn test_list_courses() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.call_tool("tc_list_courses", serde_json::json!({"orgId": "60058756004"}), Some(TEST_TOKEN)).await;
//!     assert!(response["result"]["isError"].is_null());
//! }
//! ```

mod client;
mod constants;
mod downstream;
mod server;

// Public API - this is what tests import
pub use client::{is_tool_error, result_json, result_text, TestClient};
pub use constants::*;
pub use downstream::RecordedRequest;
pub use server::TestServer;
