//! strokecast core: session state, wire messages, status projection, host traits.
//!
//! This crate holds everything about keystroke telemetry that does not depend
//! on a runtime or a socket: the counter and tracking flag, the JSON messages
//! sent to the telemetry server, the status line, and the narrow surface a
//! host editor has to provide. The agent crate drives it from an event loop.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `StrokecastError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod host;
pub mod protocol;
pub mod session;
pub mod status;

/// Shared result type.
pub use error::{Result, StrokecastError};
