//! Telemetry link: connection state machine + the controller that owns the
//! session.
//!
//! Everything that mutates session state runs on the controller task, one
//! event at a time. Connection attempts run on their own task and report back
//! through [`LinkEvent`]s.

pub mod connection;
pub mod controller;
pub mod state;

#[cfg(test)]
mod test_support;

pub use controller::{Controller, ControllerHandle, HostEvent};
pub use state::{LinkEvent, LinkState};
