//! Host editor surface.
//!
//! The host owns the UI, the command palette, and document events. The
//! controller only needs synchronous context queries plus two text sinks, so
//! that is all `Host` asks for.

/// Active editor document as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContext {
    /// Document path (or host-assigned name for untitled buffers).
    pub path: String,
    /// Host language identifier (e.g. `rust`, `python`).
    pub language_id: String,
    /// Buffer has never been saved.
    pub is_untitled: bool,
}

/// Workspace/project context as seen by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceContext {
    /// Workspace display name, if the host reports one.
    pub name: Option<String>,
    /// Number of open workspace folders.
    pub folder_count: usize,
}

impl WorkspaceContext {
    /// A workspace counts as present only when at least one folder is open.
    pub fn has_workspace(&self) -> bool {
        self.folder_count > 0
    }
}

/// Callbacks the controller uses to talk back to the host editor.
///
/// Implementations must be cheap and non-blocking: they are called from the
/// controller loop.
pub trait Host: Send + Sync {
    /// Currently focused editor, if any.
    fn active_editor(&self) -> Option<EditorContext>;
    /// Current workspace.
    fn workspace(&self) -> WorkspaceContext;
    /// Replace the single-line status display.
    fn set_status(&self, text: &str);
    /// Show a transient user-visible confirmation.
    fn show_info(&self, msg: &str);
}

/// User-invocable commands registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ResetKeystrokes,
    ToggleTracking,
    StartTracking,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::ResetKeystrokes,
        Command::ToggleTracking,
        Command::StartTracking,
    ];

    /// Identifier the host registers the command under.
    pub fn id(self) -> &'static str {
        match self {
            Command::ResetKeystrokes => "extension.resetKeystrokes",
            Command::ToggleTracking => "extension.toggleTracking",
            Command::StartTracking => "extension.startTracking",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}
