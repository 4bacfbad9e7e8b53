//! strokecast agent library entry.
//!
//! Wires the config loader, the WebSocket transport, and the telemetry link
//! controller together. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod config;
pub mod host;
pub mod link;
pub mod transport;
