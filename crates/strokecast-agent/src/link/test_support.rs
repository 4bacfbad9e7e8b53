//! In-memory host and transport for controller tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{sink, stream};
use tokio::sync::mpsc;

use strokecast_core::error::{Result, StrokecastError};
use strokecast_core::host::{EditorContext, Host, WorkspaceContext};

use crate::transport::{Channel, Inbound, Transport};

#[derive(Default)]
pub struct MockHost {
    editor: Mutex<Option<EditorContext>>,
    workspace: Mutex<WorkspaceContext>,
    statuses: Mutex<Vec<String>>,
    infos: Mutex<Vec<String>>,
}

impl MockHost {
    pub fn new(editor: Option<EditorContext>, workspace: WorkspaceContext) -> Arc<Self> {
        Arc::new(Self {
            editor: Mutex::new(editor),
            workspace: Mutex::new(workspace),
            ..Default::default()
        })
    }

    pub fn with_workspace(name: &str, folder_count: usize) -> Arc<Self> {
        Self::new(
            None,
            WorkspaceContext {
                name: Some(name.to_string()),
                folder_count,
            },
        )
    }

    pub fn set_editor(&self, editor: Option<EditorContext>) {
        *self.editor.lock().unwrap() = editor;
    }

    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn last_status(&self) -> Option<String> {
        self.statuses.lock().unwrap().last().cloned()
    }

    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }
}

impl Host for MockHost {
    fn active_editor(&self) -> Option<EditorContext> {
        self.editor.lock().unwrap().clone()
    }

    fn workspace(&self) -> WorkspaceContext {
        self.workspace.lock().unwrap().clone()
    }

    fn set_status(&self, text: &str) {
        self.statuses.lock().unwrap().push(text.to_string());
    }

    fn show_info(&self, msg: &str) {
        self.infos.lock().unwrap().push(msg.to_string());
    }
}

/// Server side of one accepted mock connection.
pub struct MockServer {
    received: mpsc::UnboundedReceiver<String>,
    inbound: mpsc::UnboundedSender<Result<Inbound>>,
}

impl MockServer {
    pub async fn next_json(&mut self) -> serde_json::Value {
        let frame = tokio::time::timeout(Duration::from_secs(5), self.received.recv())
            .await
            .expect("frame in time")
            .expect("client still connected");
        serde_json::from_str(&frame).unwrap()
    }

    pub fn try_next(&mut self) -> Option<String> {
        self.received.try_recv().ok()
    }

    /// Peer sends a close frame.
    pub fn close(&self, code: Option<u16>) {
        let _ = self.inbound.send(Ok(Inbound::Close { code }));
    }

    /// Transport error on the read side.
    pub fn fail(&self, reason: &str) {
        let _ = self
            .inbound
            .send(Err(StrokecastError::Transport(reason.to_string())));
    }

    /// True once the client dropped its sink with nothing left unread.
    pub async fn sink_closed(&mut self) -> bool {
        self.received.recv().await.is_none()
    }
}

pub struct MockTransport {
    refuse: bool,
    attempts: AtomicUsize,
    frames_sent: Arc<AtomicUsize>,
    servers_tx: mpsc::UnboundedSender<MockServer>,
    servers_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<MockServer>>,
}

impl MockTransport {
    fn build(refuse: bool) -> Arc<Self> {
        let (servers_tx, servers_rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            refuse,
            attempts: AtomicUsize::new(0),
            frames_sent: Arc::new(AtomicUsize::new(0)),
            servers_tx,
            servers_rx: tokio::sync::Mutex::new(servers_rx),
        })
    }

    pub fn accepting() -> Arc<Self> {
        Self::build(false)
    }

    /// Every connect fails like a refused TCP connection.
    pub fn refusing() -> Arc<Self> {
        Self::build(true)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn frames_sent(&self) -> usize {
        self.frames_sent.load(Ordering::SeqCst)
    }

    pub async fn next_server(&self) -> MockServer {
        let mut rx = self.servers_rx.lock().await;
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("connect in time")
            .expect("transport alive")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, _endpoint: &str) -> Result<Channel> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.refuse {
            return Err(StrokecastError::Transport("connection refused".into()));
        }

        let (out_tx, received) = mpsc::unbounded_channel::<String>();
        let (inbound, in_rx) = mpsc::unbounded_channel::<Result<Inbound>>();
        let counter = Arc::clone(&self.frames_sent);

        let sink = sink::unfold(out_tx, move |tx, frame: String| {
            let counter = Arc::clone(&counter);
            async move {
                tx.send(frame)
                    .map_err(|_| StrokecastError::Transport("peer gone".into()))?;
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, StrokecastError>(tx)
            }
        });
        let stream = stream::unfold(in_rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });

        let _ = self.servers_tx.send(MockServer { received, inbound });
        Ok(Channel {
            sink: Box::pin(sink),
            stream: Box::pin(stream),
        })
    }
}
