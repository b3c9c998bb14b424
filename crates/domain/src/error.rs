//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MotionBridgeError`] via `From` when crossing a port boundary.

/// Top-level error shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum MotionBridgeError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// An IO adapter (HTTP, MQTT) failed.
    #[error("transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations detected while building domain objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A camera name was empty or whitespace only.
    #[error("camera name must not be empty")]
    EmptyName,

    /// A required camera endpoint was not configured.
    #[error("camera {camera:?} is missing required endpoint {field:?}")]
    MissingEndpoint {
        /// Name of the offending camera.
        camera: String,
        /// Configuration key of the missing endpoint.
        field: &'static str,
    },

    /// Two cameras share the same name.
    #[error("camera name {0:?} is configured more than once")]
    DuplicateCamera(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_endpoint_with_camera_and_field() {
        let err = ValidationError::MissingEndpoint {
            camera: "garage".to_string(),
            field: "state",
        };
        assert_eq!(
            err.to_string(),
            "camera \"garage\" is missing required endpoint \"state\""
        );
    }

    #[test]
    fn should_wrap_validation_error_via_from() {
        let err: MotionBridgeError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            MotionBridgeError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_keep_transport_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = MotionBridgeError::Transport(Box::new(io));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("refused"));
    }
}
