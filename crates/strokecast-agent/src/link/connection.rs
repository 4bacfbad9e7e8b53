//! One connection attempt, from connect to close.
//!
//! Event order per attempt is `Opened? Errored? Closed`: a transport failure
//! (including a refused connect) is always followed by `Closed`, the same way
//! a WebSocket raises `close` after `error`.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::link::state::LinkEvent;
use crate::transport::{Channel, Inbound, Transport};

const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Controller-side handle to a running attempt.
pub struct ConnectionHandle {
    attempt: u64,
    out_tx: mpsc::Sender<String>,
    task: JoinHandle<()>,
}

impl ConnectionHandle {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Queue a text frame without waiting. Returns `false` if it was dropped.
    pub fn try_send(&self, frame: String) -> bool {
        match self.out_tx.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(attempt = self.attempt, "outbound queue full, frame dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Close the connection (close frame if open) and wait briefly for the task.
    pub async fn close(self) {
        let ConnectionHandle { attempt, out_tx, mut task } = self;
        drop(out_tx);
        if tokio::time::timeout(CLOSE_GRACE, &mut task).await.is_err() {
            tracing::warn!(attempt, "connection task did not finish in time, aborting");
            task.abort();
        }
    }

    pub fn abort(self) {
        self.task.abort();
    }
}

pub fn spawn(
    attempt: u64,
    transport: Arc<dyn Transport>,
    endpoint: Arc<str>,
    queue: usize,
    events: mpsc::Sender<LinkEvent>,
) -> ConnectionHandle {
    let (out_tx, out_rx) = mpsc::channel(queue);
    let task = tokio::spawn(run(attempt, transport, endpoint, out_rx, events));
    ConnectionHandle {
        attempt,
        out_tx,
        task,
    }
}

async fn run(
    attempt: u64,
    transport: Arc<dyn Transport>,
    endpoint: Arc<str>,
    mut out_rx: mpsc::Receiver<String>,
    events: mpsc::Sender<LinkEvent>,
) {
    let Channel {
        mut sink,
        mut stream,
    } = match transport.connect(&endpoint).await {
        Ok(ch) => ch,
        Err(e) => {
            let _ = events
                .send(LinkEvent::Errored {
                    attempt,
                    reason: e.to_string(),
                })
                .await;
            let _ = events.send(LinkEvent::Closed { attempt, code: None }).await;
            return;
        }
    };

    if events.send(LinkEvent::Opened { attempt }).await.is_err() {
        let _ = sink.close().await;
        return;
    }

    let code = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(frame) => {
                        if let Err(e) = sink.send(frame).await {
                            let _ = events.send(LinkEvent::Errored { attempt, reason: e.to_string() }).await;
                            break None;
                        }
                    }
                    // controller let go of us: local close
                    None => {
                        let _ = sink.close().await;
                        break Some(1000);
                    }
                }
            }

            // inbound reader (payloads ignored)
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Inbound::Close { code })) => break code,
                    Some(Ok(other)) => {
                        tracing::trace!(attempt, frame = ?other, "inbound frame ignored");
                    }
                    Some(Err(e)) => {
                        let _ = events.send(LinkEvent::Errored { attempt, reason: e.to_string() }).await;
                        break None;
                    }
                    None => break None,
                }
            }
        }
    };

    let _ = events.send(LinkEvent::Closed { attempt, code }).await;
}
