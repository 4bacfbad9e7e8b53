//! Inbound frame decoding.
//!
//! The agent is send-only, so inbound frames are only surfaced for lifecycle
//! handling (close codes) and trace logging. Payloads are never parsed.

use tokio_tungstenite::tungstenite::{self, Message};

use strokecast_core::error::{Result, StrokecastError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary { len: usize },
    Ping,
    Pong,
    Close { code: Option<u16> },
}

pub fn decode(item: std::result::Result<Message, tungstenite::Error>) -> Result<Inbound> {
    let msg = item.map_err(|e| StrokecastError::Transport(format!("receive failed: {e}")))?;
    Ok(match msg {
        Message::Text(s) => Inbound::Text(s),
        Message::Binary(b) => Inbound::Binary { len: b.len() },
        Message::Ping(_) => Inbound::Ping,
        Message::Pong(_) => Inbound::Pong,
        Message::Close(frame) => Inbound::Close {
            code: frame.map(|f| u16::from(f.code)),
        },
        Message::Frame(f) => Inbound::Binary { len: f.len() },
    })
}
