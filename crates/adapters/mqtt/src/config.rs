//! MQTT session configuration.

use serde::Deserialize;

/// Configuration for the MQTT bus session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic filter commands are received on.
    pub subscribe_topic: String,
    /// Topic camera state and bridge availability are published to.
    pub publish_topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause between reconnection attempts after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
    /// Capacity of the client's outgoing request queue.
    pub request_capacity: usize,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "motionbridge".to_string(),
            subscribe_topic: "motion/command".to_string(),
            publish_topic: "motion/state".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            request_capacity: 64,
        }
    }
}

impl MqttConfig {
    /// Check settings before any connection is attempted.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason for the first invalid setting: empty
    /// host or client id, port 0, a request queue too small for the
    /// availability publish plus the subscription, or an invalid topic.
    pub fn validate(&self) -> Result<(), String> {
        if self.broker_host.is_empty() {
            return Err("mqtt.broker_host must not be empty".to_string());
        }
        if self.broker_port == 0 {
            return Err("mqtt.broker_port must be non-zero".to_string());
        }
        if self.client_id.is_empty() {
            return Err("mqtt.client_id must not be empty".to_string());
        }
        if self.request_capacity < 2 {
            return Err(format!(
                "mqtt.request_capacity must be at least 2, got {}",
                self.request_capacity
            ));
        }
        if self.subscribe_topic.is_empty() || !rumqttc::valid_filter(&self.subscribe_topic) {
            return Err(format!(
                "mqtt.subscribe_topic {:?} is not a valid topic filter",
                self.subscribe_topic
            ));
        }
        if self.publish_topic.is_empty() || !rumqttc::valid_topic(&self.publish_topic) {
            return Err(format!(
                "mqtt.publish_topic {:?} must be a topic without wildcards",
                self.publish_topic
            ));
        }
        Ok(())
    }
}
