use std::path::PathBuf;
use thiserror::Error;

/// Failures of one analysis request. All of them end the current upload.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read {path}: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; the message is the response body.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Malformed analysis response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AnalysisError {
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        };
        Self::Status { status, message }
    }
}

/// Failures of the routing service. These never reach the user: callers fall
/// back to straight-line geometry.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("routing service returned HTTP {0}")]
    Status(u16),

    #[error("routing service found no route (code {0})")]
    NoRoute(String),

    #[error("malformed routing response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("at least two waypoints are required, got {0}")]
    TooFewWaypoints(usize),

    #[error("routing is disabled")]
    Disabled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_body_as_message() {
        let error = AnalysisError::status(500, "  Failed to process image\n");
        assert_eq!(error.to_string(), "Failed to process image");
    }

    #[test]
    fn status_error_with_empty_body_names_the_code() {
        let error = AnalysisError::status(502, "");
        assert_eq!(error.to_string(), "HTTP 502");
        assert!(matches!(error, AnalysisError::Status { status: 502, .. }));
    }
}
