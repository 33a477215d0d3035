//! Error taxonomy for downstream TrainerCentral calls.

use thiserror::Error;

/// Failures from the TrainerCentral REST API.
///
/// Non-2xx statuses are classified here instead of being returned as
/// ordinary response bodies, so callers can always tell an error apart
/// from success data with a similar shape.
#[derive(Debug, Error)]
pub enum TcError {
    /// Network/transport failure, including timeouts.
    #[error("TrainerCentral request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("TrainerCentral returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 2xx but the body was not valid JSON.
    #[error("Unexpected TrainerCentral response: {0}")]
    InvalidResponse(String),

    /// A schedule time string did not match the required format.
    #[error("Invalid schedule time: {0}")]
    Schedule(String),
}

impl TcError {
    /// True for 4xx responses (caller mistake: bad payload, bad ids, expired token).
    pub fn is_client_error(&self) -> bool {
        matches!(self, TcError::Api { status, .. } if (400..500).contains(status))
    }

    /// True for 5xx responses and transport failures (retryable by the caller).
    pub fn is_server_error(&self) -> bool {
        match self {
            TcError::Api { status, .. } => *status >= 500,
            TcError::Transport(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_classification() {
        let not_found = TcError::Api {
            status: 404,
            body: "{}".to_string(),
        };
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = TcError::Api {
            status: 503,
            body: "{}".to_string(),
        };
        assert!(!unavailable.is_client_error());
        assert!(unavailable.is_server_error());
    }

    #[test]
    fn test_schedule_error_is_neither() {
        let err = TcError::Schedule("bad".to_string());
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_error_message_includes_status_and_body() {
        let err = TcError::Api {
            status: 422,
            body: r#"{"error":"invalid course"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("invalid course"));
    }
}
