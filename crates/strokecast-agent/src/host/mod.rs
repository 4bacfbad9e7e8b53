//! Host glue shipped with the agent.
//!
//! Real editor integrations implement [`strokecast_core::host::Host`]
//! themselves; the stdio host lets the binary run standalone.

pub mod stdio;

pub use stdio::{HostInput, StdioHost};
