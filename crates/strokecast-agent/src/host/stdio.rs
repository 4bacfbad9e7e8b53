//! Line-oriented stdio host.
//!
//! Each input line is one JSON object tagged by `kind`:
//!
//! ```text
//! {"kind":"editor","path":"/a/b/c.py","language_id":"python"}
//! {"kind":"workspace","name":"proj","folder_count":1}
//! {"kind":"change","inserted":[3,"abcd"]}
//! {"kind":"command","id":"extension.toggleTracking"}
//! {"kind":"shutdown"}
//! ```
//!
//! Status lines and confirmations go to stdout as `status: ...` / `info: ...`.

use std::io::{BufRead, Write};
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;
use tokio::sync::mpsc;

use strokecast_core::error::{Result, StrokecastError};
use strokecast_core::host::{Command, EditorContext, Host, WorkspaceContext};
use strokecast_core::session::TextDelta;

use crate::link::{ControllerHandle, HostEvent};

const STDIN_QUEUE: usize = 64;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum HostInput {
    Change {
        inserted: Vec<Inserted>,
    },
    Command {
        id: String,
    },
    Editor {
        path: String,
        language_id: String,
        #[serde(default)]
        is_untitled: bool,
    },
    CloseEditor,
    Workspace {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        folder_count: usize,
    },
    Shutdown,
}

/// One content change: either a length or the inserted text itself.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Inserted {
    Len(u64),
    Text(String),
}

impl Inserted {
    fn delta(&self) -> TextDelta {
        match self {
            Inserted::Len(n) => TextDelta::new(*n),
            Inserted::Text(s) => TextDelta::from_text(s),
        }
    }
}

pub fn parse_line(line: &str) -> Result<HostInput> {
    serde_json::from_str(line).map_err(|e| StrokecastError::BadInput(format!("invalid host input: {e}")))
}

#[derive(Debug, Default)]
pub struct StdioHost {
    editor: Mutex<Option<EditorContext>>,
    workspace: Mutex<WorkspaceContext>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StdioHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply context updates locally; return the event the controller must see.
    pub fn apply(&self, input: HostInput) -> Option<HostEvent> {
        match input {
            HostInput::Change { inserted } => Some(HostEvent::TextChanged(
                inserted.iter().map(Inserted::delta).collect(),
            )),
            HostInput::Command { id } => match Command::from_id(&id) {
                Some(cmd) => Some(HostEvent::Command(cmd)),
                None => {
                    tracing::warn!(%id, "unknown command");
                    None
                }
            },
            HostInput::Editor {
                path,
                language_id,
                is_untitled,
            } => {
                *lock(&self.editor) = Some(EditorContext {
                    path,
                    language_id,
                    is_untitled,
                });
                None
            }
            HostInput::CloseEditor => {
                *lock(&self.editor) = None;
                None
            }
            HostInput::Workspace { name, folder_count } => {
                *lock(&self.workspace) = WorkspaceContext { name, folder_count };
                None
            }
            HostInput::Shutdown => Some(HostEvent::Shutdown),
        }
    }

    fn emit(&self, prefix: &str, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{prefix}: {text}");
        let _ = out.flush();
    }
}

impl Host for StdioHost {
    fn active_editor(&self) -> Option<EditorContext> {
        lock(&self.editor).clone()
    }

    fn workspace(&self) -> WorkspaceContext {
        lock(&self.workspace).clone()
    }

    fn set_status(&self, text: &str) {
        self.emit("status", text);
    }

    fn show_info(&self, msg: &str) {
        self.emit("info", msg);
    }
}

/// Read stdin until EOF or a `shutdown` line, forwarding events to the controller.
///
/// Lines are read on a dedicated OS thread so a pending read never holds up
/// runtime shutdown.
pub async fn pump_stdin(host: &StdioHost, controller: &ControllerHandle) -> Result<()> {
    let (line_tx, mut line_rx) = mpsc::channel::<String>(STDIN_QUEUE);
    std::thread::Builder::new()
        .name("strokecast-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|e| StrokecastError::Internal(format!("spawn stdin reader failed: {e}")))?;

    while let Some(line) = line_rx.recv().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let input = match parse_line(line) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(code = e.code().as_str(), error = %e, "host input skipped");
                continue;
            }
        };
        match host.apply(input) {
            Some(HostEvent::Shutdown) => break,
            Some(ev) => controller.dispatch(ev).await?,
            None => {}
        }
    }
    Ok(())
}
