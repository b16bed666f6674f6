//! Poll session lifecycle.

use serde::Serialize;
use std::fmt;

/// State of one poll session.
///
/// `Idle → Polling → {Succeeded | TimedOut | Cancelled}`. A fetch error moves
/// `Polling` to `Errored`; the next successful non-complete fetch moves back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollState {
    Idle,
    Polling,
    Errored,
    Succeeded,
    TimedOut,
    Cancelled,
}

impl PollState {
    /// Terminal states never transition again and fire no callbacks.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PollState::Succeeded | PollState::TimedOut | PollState::Cancelled
        )
    }

    /// True while timers are running.
    pub fn is_active(self) -> bool {
        matches!(self, PollState::Polling | PollState::Errored)
    }
}

impl Default for PollState {
    fn default() -> Self {
        PollState::Idle
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PollState::Idle => "idle",
            PollState::Polling => "polling",
            PollState::Errored => "errored",
            PollState::Succeeded => "succeeded",
            PollState::TimedOut => "timed_out",
            PollState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}
