//! Outbound bus payloads.
//!
//! Both payloads go to the single configured publish topic and are told
//! apart by their keys: `{"camera", "state"}` for camera state and `{"main"}`
//! for bridge availability.

use serde::Serialize;

use crate::status::{BridgeAvailability, DeviceStatus};

/// State of one camera, published retained at the highest QoS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub camera: String,
    pub state: DeviceStatus,
}

impl StatusMessage {
    #[must_use]
    pub fn new(camera: impl Into<String>, state: DeviceStatus) -> Self {
        Self {
            camera: camera.into(),
            state,
        }
    }

    /// Encode as the JSON bytes sent on the wire.
    #[must_use]
    pub fn to_payload(&self) -> Vec<u8> {
        encode(self)
    }
}

/// Liveness of the bridge, published on connect and registered as last will.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityMessage {
    pub main: BridgeAvailability,
}

impl AvailabilityMessage {
    #[must_use]
    pub fn available() -> Self {
        Self {
            main: BridgeAvailability::Available,
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            main: BridgeAvailability::Unavailable,
        }
    }

    #[must_use]
    pub fn to_payload(&self) -> Vec<u8> {
        encode(self)
    }
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    // Plain structs of strings and unit enums always serialize.
    serde_json::to_vec(value).unwrap_or_default()
}
