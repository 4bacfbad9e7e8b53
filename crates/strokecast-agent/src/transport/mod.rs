//! Transport layer (outbound WebSocket client).
//!
//! The link controller only sees a [`Transport`] that yields a [`Channel`]:
//! a sink of text frames and a stream of decoded inbound frames. The real
//! implementation is [`ws::WsTransport`]; tests substitute in-memory channels.

pub mod codec;
pub mod ws;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Sink, Stream};

use strokecast_core::error::{Result, StrokecastError};

pub use codec::Inbound;
pub use ws::WsTransport;

/// Outbound half: JSON text frames.
pub type FrameSink = Pin<Box<dyn Sink<String, Error = StrokecastError> + Send>>;

/// Inbound half. Ends (`None`) when the peer goes away without a close frame.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<Inbound>> + Send>>;

/// One established connection, already split.
pub struct Channel {
    pub sink: FrameSink,
    pub stream: FrameStream,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection and complete the handshake.
    async fn connect(&self, endpoint: &str) -> Result<Channel>;
}
