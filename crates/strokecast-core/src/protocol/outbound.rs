//! Outbound messages.
//!
//! Field names are camelCase on the wire; the variant name goes into `type`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::{EditorContext, WorkspaceContext};

const UNTITLED: &str = "untitled";
const PLAINTEXT: &str = "plaintext";
const NO_WORKSPACE: &str = "No Workspace";

/// Every message the link can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    ConnectionEstablished(ConnectionEstablished),
    KeystrokeUpdate(KeystrokeUpdate),
}

/// Sent once per successful connect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEstablished {
    pub time_stamp: u64,
    pub has_workspace: bool,
    pub workspace_name: String,
}

/// Sent once per counted change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystrokeUpdate {
    pub key_strokes: u64,
    pub time_stamp: u64,
    pub language: String,
    /// Basename only.
    pub file_name: String,
    /// Path as reported by the host.
    pub full_path: String,
    pub workspace_name: String,
    pub has_workspace: bool,
    pub has_active_editor: bool,
    pub is_untitled: bool,
}

impl Outbound {
    pub fn connection_established(workspace: &WorkspaceContext, time_stamp: u64) -> Self {
        Outbound::ConnectionEstablished(ConnectionEstablished {
            time_stamp,
            has_workspace: workspace.has_workspace(),
            workspace_name: workspace_name(workspace),
        })
    }

    /// Snapshot of the counter plus editing context.
    ///
    /// Without an active editor the document fields fall back to
    /// `untitled` / `plaintext`.
    pub fn keystroke_update(
        key_strokes: u64,
        editor: Option<&EditorContext>,
        workspace: &WorkspaceContext,
        time_stamp: u64,
    ) -> Self {
        let full_path = editor
            .map(|e| e.path.as_str())
            .filter(|p| !p.is_empty())
            .unwrap_or(UNTITLED);
        let language = editor
            .map(|e| e.language_id.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or(PLAINTEXT);

        Outbound::KeystrokeUpdate(KeystrokeUpdate {
            key_strokes,
            time_stamp,
            language: language.to_string(),
            file_name: short_file_name(full_path).to_string(),
            full_path: full_path.to_string(),
            workspace_name: workspace_name(workspace),
            has_workspace: workspace.has_workspace(),
            has_active_editor: editor.is_some(),
            is_untitled: editor.map(|e| e.is_untitled).unwrap_or(false),
        })
    }

    /// Value of the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Outbound::ConnectionEstablished(_) => "connection_established",
            Outbound::KeystrokeUpdate(_) => "keystroke_update",
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn workspace_name(workspace: &WorkspaceContext) -> String {
    workspace
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(NO_WORKSPACE)
        .to_string()
}

/// Last path segment, splitting on both `/` and `\`.
///
/// A path ending in a separator has no basename and maps to `untitled`.
pub fn short_file_name(path: &str) -> &str {
    match path.rsplit(['/', '\\']).next() {
        Some("") | None => UNTITLED,
        Some(name) => name,
    }
}

/// Wall-clock milliseconds since the Unix epoch (0 if the clock is before it).
pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
