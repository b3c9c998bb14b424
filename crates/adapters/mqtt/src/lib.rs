//! # motionbridge-adapter-mqtt
//!
//! MQTT adapter — owns the broker session and bridges it to the dispatcher.
//!
//! ## Responsibilities
//! - Register the last will (`{"main":"UNAVAILABLE"}`, retained, QoS 1)
//!   before connecting
//! - On every connection: publish `{"main":"AVAILABLE"}` (retained, QoS 1),
//!   subscribe to the command topic, then let the handler republish every
//!   camera's state
//! - Deliver inbound command payloads to the handler, one at a time
//! - Publish camera state retained at QoS 2 ([`MqttStatusPublisher`])
//! - Disconnect cleanly on shutdown so the last will is not delivered
//!
//! ## Dependency rule
//! Same as other adapters: depends on `motionbridge-app` and
//! `motionbridge-domain`.

mod config;
mod error;
mod publisher;
mod session;

pub use config::MqttConfig;
pub use error::MqttError;
pub use publisher::MqttStatusPublisher;
pub use session::{BusSession, SessionState};
