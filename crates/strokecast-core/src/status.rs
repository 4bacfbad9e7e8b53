//! Status line projection.

use crate::session::SessionState;

pub const TRACKING_GLYPH: &str = "●";
pub const IDLE_GLYPH: &str = "○";
pub const NO_WORKSPACE_SUFFIX: &str = " (No WS)";

/// Render the status line for the current session.
pub fn render(state: &SessionState, has_workspace: bool) -> String {
    let glyph = if state.tracking_enabled() {
        TRACKING_GLYPH
    } else {
        IDLE_GLYPH
    };
    let suffix = if has_workspace { "" } else { NO_WORKSPACE_SUFFIX };
    format!("{glyph} Keystrokes: {}{suffix}", state.total_keystrokes())
}
