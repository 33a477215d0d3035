//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (org ids, fixture courses, etc.),
//! update only this file.

// ============================================================================
// Credentials
// ============================================================================

/// Bearer token accepted by the stub downstream (it accepts anything,
/// but tests assert this exact value was forwarded).
pub const TEST_TOKEN: &str = "test-access-token-0123456789";

// ============================================================================
// Fixture Data
// ============================================================================

/// Default org id reported by the `portals.json` fixture.
pub const TEST_ORG_ID: &str = "60058756004";

/// Second (non-default) org id in the portals fixture.
pub const OTHER_ORG_ID: &str = "60058756005";

/// Number of courses in the `courses.json` fixture.
pub const FIXTURE_COURSE_COUNT: usize = 12;

/// Course id present in the fixture list.
pub const COURSE_1_ID: &str = "course-1";

/// Session id assigned by the stub to every created session.
pub const CREATED_SESSION_ID: &str = "sess-100";

// ============================================================================
// Timeouts
// ============================================================================

pub const REQUEST_TIMEOUT_SECS: u64 = 5;
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
