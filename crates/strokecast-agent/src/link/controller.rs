//! Link controller: owns the session state and drives the link state machine.
//!
//! Host events, link events, and the reconnect timer are serialized through
//! one `select!` loop, so every handler runs to completion before the next one
//! starts. The controller is the only writer of [`SessionState`].

use std::future::pending;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{sleep, Sleep};

use strokecast_core::error::{Result, StrokecastError};
use strokecast_core::host::{Command, Host};
use strokecast_core::protocol::{epoch_millis, Outbound};
use strokecast_core::session::{SessionState, TextDelta};
use strokecast_core::status;

use crate::config::LinkSection;
use crate::link::connection::{self, ConnectionHandle};
use crate::link::state::{LinkEvent, LinkState};
use crate::transport::Transport;

const HOST_QUEUE: usize = 1024;
const LINK_QUEUE: usize = 64;

/// Input from the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    TextChanged(Vec<TextDelta>),
    Command(Command),
    Shutdown,
}

/// Cloneable sender side used by the host glue.
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::Sender<HostEvent>,
}

impl ControllerHandle {
    pub async fn dispatch(&self, ev: HostEvent) -> Result<()> {
        self.tx
            .send(ev)
            .await
            .map_err(|_| StrokecastError::Internal("controller stopped".into()))
    }

    pub async fn text_changed(&self, deltas: Vec<TextDelta>) -> Result<()> {
        self.dispatch(HostEvent::TextChanged(deltas)).await
    }

    pub async fn command(&self, command: Command) -> Result<()> {
        self.dispatch(HostEvent::Command(command)).await
    }

    /// Ask the controller to close the link and stop. Idempotent.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(HostEvent::Shutdown).await;
    }
}

pub struct Controller {
    cfg: LinkSection,
    endpoint: Arc<str>,
    host: Arc<dyn Host>,
    transport: Arc<dyn Transport>,

    session: SessionState,
    state: LinkState,
    attempts: u64,
    conn: Option<ConnectionHandle>,
    /// The only reconnect timer. Replacing it cancels the previous one.
    reconnect: Option<Pin<Box<Sleep>>>,

    host_rx: mpsc::Receiver<HostEvent>,
    link_tx: mpsc::Sender<LinkEvent>,
    link_rx: mpsc::Receiver<LinkEvent>,
}

impl Controller {
    pub fn new(
        cfg: LinkSection,
        host: Arc<dyn Host>,
        transport: Arc<dyn Transport>,
    ) -> (Self, ControllerHandle) {
        let (host_tx, host_rx) = mpsc::channel(HOST_QUEUE);
        let (link_tx, link_rx) = mpsc::channel(LINK_QUEUE);
        let controller = Self {
            endpoint: Arc::from(cfg.endpoint.as_str()),
            cfg,
            host,
            transport,
            session: SessionState::new(),
            state: LinkState::Disconnected,
            attempts: 0,
            conn: None,
            reconnect: None,
            host_rx,
            link_tx,
            link_rx,
        };
        (controller, ControllerHandle { tx: host_tx })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn link_state(&self) -> LinkState {
        self.state
    }

    /// Connection attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect.is_some()
    }

    /// Run until shutdown is requested or every handle is dropped.
    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.endpoint, "telemetry link starting");
        self.refresh_status();
        self.connect();

        loop {
            tokio::select! {
                ev = self.host_rx.recv() => {
                    match ev {
                        Some(HostEvent::Shutdown) | None => break,
                        Some(ev) => self.on_host_event(ev),
                    }
                }

                Some(ev) = self.link_rx.recv() => self.on_link_event(ev),

                _ = reconnect_due(&mut self.reconnect) => self.on_reconnect_due(),
            }
        }

        self.shutdown().await;
    }

    pub(crate) fn on_host_event(&mut self, ev: HostEvent) {
        match ev {
            HostEvent::TextChanged(deltas) => {
                if let Some(total) = self.session.apply_change(&deltas) {
                    tracing::trace!(total, deltas = deltas.len(), "keystrokes counted");
                    self.refresh_status();
                    self.send_snapshot();
                }
            }
            HostEvent::Command(cmd) => self.on_command(cmd),
            HostEvent::Shutdown => {}
        }
    }

    fn on_command(&mut self, cmd: Command) {
        tracing::debug!(command = cmd.id(), "command invoked");
        match cmd {
            Command::ResetKeystrokes => {
                self.session.reset();
                self.refresh_status();
                self.host.show_info("Keystroke count reset");
            }
            Command::ToggleTracking => {
                let enabled = self.session.toggle();
                self.refresh_status();
                let word = if enabled { "enabled" } else { "disabled" };
                self.host.show_info(&format!("Keystroke tracking {word}"));
            }
            Command::StartTracking => {
                if self.session.start() {
                    self.refresh_status();
                    self.host.show_info("Keystroke tracking started");
                }
            }
        }
    }

    pub(crate) fn on_link_event(&mut self, ev: LinkEvent) {
        if ev.attempt() != self.attempts {
            tracing::debug!(attempt = ev.attempt(), current = self.attempts, "stale link event ignored");
            return;
        }

        match ev {
            LinkEvent::Opened { attempt } => {
                tracing::info!(endpoint = %self.endpoint, attempt, "telemetry link connected");
                self.state = LinkState::Open;
                self.session.set_tracking(true);
                self.refresh_status();
                let msg = Outbound::connection_established(&self.host.workspace(), epoch_millis());
                self.send(&msg);
            }
            LinkEvent::Errored { attempt, reason } => {
                tracing::error!(endpoint = %self.endpoint, attempt, %reason, "telemetry link error");
                self.state = LinkState::Errored;
                self.session.set_tracking(false);
                self.refresh_status();
            }
            LinkEvent::Closed { attempt, code } => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    attempt,
                    code = ?code,
                    delay_ms = self.cfg.reconnect_delay_ms,
                    "telemetry link closed, reconnecting"
                );
                self.state = LinkState::Closed;
                self.conn = None;
                self.session.set_tracking(false);
                self.refresh_status();
                self.schedule_reconnect();
            }
        }
    }

    pub(crate) fn on_reconnect_due(&mut self) {
        self.reconnect = None;
        self.connect();
    }

    fn schedule_reconnect(&mut self) {
        self.reconnect = Some(Box::pin(sleep(self.cfg.reconnect_delay())));
    }

    fn connect(&mut self) {
        if let Some(old) = self.conn.take() {
            old.abort();
        }
        self.attempts += 1;
        self.state = LinkState::Connecting;
        tracing::debug!(endpoint = %self.endpoint, attempt = self.attempts, "connecting");
        self.conn = Some(connection::spawn(
            self.attempts,
            Arc::clone(&self.transport),
            Arc::clone(&self.endpoint),
            self.cfg.outbound_queue,
            self.link_tx.clone(),
        ));
    }

    fn send_snapshot(&self) {
        let editor = self.host.active_editor();
        let msg = Outbound::keystroke_update(
            self.session.total_keystrokes(),
            editor.as_ref(),
            &self.host.workspace(),
            epoch_millis(),
        );
        self.send(&msg);
    }

    /// Best-effort send; dropped unless the link is open.
    fn send(&self, msg: &Outbound) {
        let Some(conn) = self.conn.as_ref().filter(|_| self.state == LinkState::Open) else {
            tracing::trace!(kind = msg.kind(), state = self.state.as_str(), "link not open, message dropped");
            return;
        };
        match msg.to_json() {
            Ok(frame) => {
                conn.try_send(frame);
            }
            Err(e) => {
                tracing::error!(kind = msg.kind(), code = e.code().as_str(), error = %e, "message dropped");
            }
        }
    }

    fn refresh_status(&self) {
        let line = status::render(&self.session, self.host.workspace().has_workspace());
        self.host.set_status(&line);
    }

    async fn shutdown(&mut self) {
        self.reconnect = None;
        if let Some(conn) = self.conn.take() {
            tracing::info!(attempt = conn.attempt(), "closing telemetry link");
            conn.close().await;
        }
        self.state = LinkState::Disconnected;
    }
}

async fn reconnect_due(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(t) => t.as_mut().await,
        None => pending().await,
    }
}
