//! HTTP adapter error types.

use motionbridge_domain::error::MotionBridgeError;

/// Errors specific to the HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The camera answered with a non-success status code.
    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be read as text.
    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<HttpError> for MotionBridgeError {
    fn from(err: HttpError) -> Self {
        Self::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_status_error_with_url_and_code() {
        let err = HttpError::Status {
            url: "http://cam/state".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "http://cam/state answered with HTTP 404 Not Found"
        );
    }

    #[test]
    fn should_convert_to_transport_error() {
        let err: MotionBridgeError = HttpError::Status {
            url: "http://cam/state".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into();
        assert!(matches!(err, MotionBridgeError::Transport(_)));
    }
}
