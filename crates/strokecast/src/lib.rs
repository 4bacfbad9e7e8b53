//! Top-level facade crate for strokecast.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use strokecast_core::*;
}

pub mod agent {
    pub use strokecast_agent::*;
}
