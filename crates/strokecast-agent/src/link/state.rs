/// Connection lifecycle as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Open,
    Closed,
    Errored,
}

impl LinkState {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkState::Disconnected => "disconnected",
            LinkState::Connecting => "connecting",
            LinkState::Open => "open",
            LinkState::Closed => "closed",
            LinkState::Errored => "errored",
        }
    }
}

/// Reported by a connection task. `attempt` identifies the task so events
/// from a superseded attempt can be ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Opened { attempt: u64 },
    Closed { attempt: u64, code: Option<u16> },
    Errored { attempt: u64, reason: String },
}

impl LinkEvent {
    pub fn attempt(&self) -> u64 {
        match self {
            LinkEvent::Opened { attempt }
            | LinkEvent::Closed { attempt, .. }
            | LinkEvent::Errored { attempt, .. } => *attempt,
        }
    }
}
