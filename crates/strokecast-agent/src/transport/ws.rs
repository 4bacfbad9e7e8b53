//! WebSocket client transport (tokio-tungstenite).

use async_trait::async_trait;
use futures_util::{future, SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use strokecast_core::error::{Result, StrokecastError};

use super::{codec, Channel, Transport};

#[derive(Debug, Default, Clone, Copy)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn connect(&self, endpoint: &str) -> Result<Channel> {
        let (socket, resp) = connect_async(endpoint)
            .await
            .map_err(|e| StrokecastError::Transport(format!("connect failed: {e}")))?;
        tracing::debug!(%endpoint, status = %resp.status(), "websocket handshake complete");

        let (ws_tx, ws_rx) = socket.split();
        let sink = ws_tx
            .sink_map_err(|e| StrokecastError::Transport(format!("send failed: {e}")))
            .with(|text: String| future::ready(Ok::<_, StrokecastError>(Message::Text(text))));
        let stream = ws_rx.map(codec::decode);

        Ok(Channel {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        })
    }
}
