// simulation/state.rs

// Coarse execution status of a collection session. Transitions are driven by
// Session: Idle -> Planning -> (Comparing ->) Executing -> Done, with replans
// looping back into Executing while targets remain.

use std::fmt;

/// Session operating status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing planned yet, waiting for a start request
    Idle,
    /// A plan is being computed
    Planning,
    /// Fresh full-sweep plan on display before the agent moves
    Comparing,
    /// Agent is driving along the current path
    Executing,
    /// Field is clear or no plan could be made
    Done,
}

impl SessionStatus {
    /// Whether a start request is accepted in this status
    pub fn can_start(self) -> bool {
        matches!(self, SessionStatus::Idle | SessionStatus::Done)
    }

    /// Whether time advances anything in this status
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Comparing | SessionStatus::Executing)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Planning => "planning",
            SessionStatus::Comparing => "comparing",
            SessionStatus::Executing => "executing",
            SessionStatus::Done => "done",
        };
        f.write_str(name)
    }
}
