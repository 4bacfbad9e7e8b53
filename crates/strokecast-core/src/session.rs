//! Session state: the keystroke counter and the tracking gate.

/// One content change inside a text-change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDelta {
    /// Length of the inserted text (0 for a pure deletion).
    pub inserted_len: u64,
}

impl TextDelta {
    pub fn new(inserted_len: u64) -> Self {
        Self { inserted_len }
    }

    /// Build a delta from inserted text, counting Unicode scalar values.
    pub fn from_text(text: &str) -> Self {
        Self {
            inserted_len: text.chars().count() as u64,
        }
    }
}

/// Counter + tracking flag. One instance per process, owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    total_keystrokes: u64,
    tracking_enabled: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_keystrokes(&self) -> u64 {
        self.total_keystrokes
    }

    pub fn tracking_enabled(&self) -> bool {
        self.tracking_enabled
    }

    /// Apply one text-change event.
    ///
    /// Returns the new total when the event was counted, `None` when it was
    /// ignored (tracking off or no deltas). A counted event is one status
    /// refresh and one snapshot send, however many deltas it carries.
    pub fn apply_change(&mut self, deltas: &[TextDelta]) -> Option<u64> {
        if !self.tracking_enabled || deltas.is_empty() {
            return None;
        }
        let added = deltas
            .iter()
            .fold(0u64, |acc, d| acc.saturating_add(d.inserted_len));
        self.total_keystrokes = self.total_keystrokes.saturating_add(added);
        Some(self.total_keystrokes)
    }

    /// Zero the counter regardless of tracking state.
    pub fn reset(&mut self) {
        self.total_keystrokes = 0;
    }

    /// Flip tracking; returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.tracking_enabled = !self.tracking_enabled;
        self.tracking_enabled
    }

    /// Enable tracking if it is off. Returns `true` when the state changed.
    pub fn start(&mut self) -> bool {
        if self.tracking_enabled {
            return false;
        }
        self.tracking_enabled = true;
        true
    }

    /// Force tracking on or off (link lifecycle).
    pub fn set_tracking(&mut self, enabled: bool) {
        self.tracking_enabled = enabled;
    }
}
