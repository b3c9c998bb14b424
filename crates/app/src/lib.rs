//! # motionbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **driven/outbound ports** that adapters must implement:
//!   - `HttpFetcher` — a single HTTP GET returning the body text
//!   - `StatusPublisher` — publish a camera state message onto the bus
//! - Define the **driving/inbound port** the bus adapter calls into:
//!   - `BusHandler` — connection established, message received
//! - Provide the use-cases:
//!   - `DeviceGateway` — fire-and-forget actuation and state classification
//!   - `Dispatcher` — decode a command, resolve the camera, act, republish
//!
//! ## Dependency rule
//! Depends on `motionbridge-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
