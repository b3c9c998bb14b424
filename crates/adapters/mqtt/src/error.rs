//! MQTT adapter error types.

use motionbridge_domain::error::MotionBridgeError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The configuration was rejected before connecting.
    #[error("invalid MQTT configuration: {0}")]
    Config(String),

    /// The rumqttc client returned an error (request queue closed or full).
    #[error("MQTT client error")]
    Client(#[from] rumqttc::ClientError),

    /// A background task of the session panicked or was cancelled.
    #[error("MQTT session task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl From<MqttError> for MotionBridgeError {
    fn from(err: MqttError) -> Self {
        Self::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_config_error() {
        let err = MqttError::Config("mqtt.broker_port must be non-zero".to_string());
        assert_eq!(
            err.to_string(),
            "invalid MQTT configuration: mqtt.broker_port must be non-zero"
        );
    }

    #[test]
    fn should_convert_to_transport_error() {
        let err: MotionBridgeError = MqttError::Config("bad".to_string()).into();
        assert!(matches!(err, MotionBridgeError::Transport(_)));
    }
}
