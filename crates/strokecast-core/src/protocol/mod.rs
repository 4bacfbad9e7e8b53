//! Wire protocol (send-only JSON text frames).
//!
//! The agent never consumes inbound application messages; everything here is
//! outbound. Messages are built per send from the session and host context
//! and serialized exactly once.

pub mod outbound;

pub use outbound::{epoch_millis, short_file_name, ConnectionEstablished, KeystrokeUpdate, Outbound};
