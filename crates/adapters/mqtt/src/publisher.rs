//! [`StatusPublisher`] implementation over a rumqttc client handle.

use rumqttc::{AsyncClient, QoS};

use motionbridge_app::ports::StatusPublisher;
use motionbridge_domain::error::MotionBridgeError;
use motionbridge_domain::message::StatusMessage;

use crate::error::MqttError;

/// Publishes camera state retained with QoS 2 on the configured topic.
///
/// Holds a clone of the session's client handle; it can publish but never
/// changes the connection itself.
#[derive(Clone)]
pub struct MqttStatusPublisher {
    client: AsyncClient,
    topic: String,
}

impl MqttStatusPublisher {
    pub(crate) fn new(client: AsyncClient, topic: String) -> Self {
        Self { client, topic }
    }

    /// Topic this publisher writes to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl StatusPublisher for MqttStatusPublisher {
    async fn publish_status(&self, message: &StatusMessage) -> Result<(), MotionBridgeError> {
        self.client
            .publish(&self.topic, QoS::ExactlyOnce, true, message.to_payload())
            .await
            .map_err(MqttError::from)?;
        Ok(())
    }
}
