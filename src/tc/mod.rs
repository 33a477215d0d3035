//! Downstream TrainerCentral API client.
//!
//! Translates logical operations into REST calls against the
//! TrainerCentral v4 API, scoped per organization and authenticated with
//! the caller's forwarded bearer token. No retries, no caching; every
//! failure is classified and surfaced to the caller.

mod client;
mod error;
mod schedule;

pub use client::{TrainerCentralApi, TrainerCentralClient};
pub use error::TcError;
pub use schedule::convert_schedule_time;

use std::fmt;

/// Bearer token forwarded from the MCP caller.
///
/// Opaque and request-scoped. Debug/Display render only a short prefix so
/// the full credential never reaches log output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The full token value, for the Authorization header only.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// A loggable prefix of the token.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.redacted())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}
