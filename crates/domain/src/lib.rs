//! # motionbridge-domain
//!
//! Pure domain model for the motionbridge camera bridge.
//!
//! ## Responsibilities
//! - Describe **cameras** (control endpoints and pan/tilt capability)
//! - Hold the immutable **camera registry** with first-match name lookup
//! - Define **commands** accepted over the bus and how they are decoded
//! - Define **device status** and the contract for classifying a camera's
//!   state page
//! - Define the JSON **payloads** published back onto the bus
//! - Contain all invariant enforcement (required endpoints, unique names)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod camera;
pub mod command;
pub mod message;
pub mod registry;
pub mod status;
