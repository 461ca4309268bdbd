//! The explicit run-lifecycle state machine.
//!
//! The hosting engine's callback-driven lifecycle (construct once,
//! per-event reset, per-step hook, per-run shutdown) is modelled as
//! explicit states with a pure transition function. The driver in this
//! crate consults it; an external engine may drive it directly. The
//! core never depends on being invoked from any particular runtime.

use std::fmt;

/// Where a run currently is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Nothing built yet.
    Uninitialized,
    /// Geometry constructed; no event open.
    GeometryReady,
    /// An event is being stepped.
    EventInProgress,
    /// The last event finished; another may start or the run may close.
    EventComplete,
    /// The store is flushed; the run is over.
    RunComplete,
}

impl RunState {
    /// Whether `self → to` is a legal lifecycle transition.
    pub fn can_transition(self, to: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, to),
            (Uninitialized, GeometryReady)
                | (GeometryReady, EventInProgress)
                | (GeometryReady, RunComplete)
                | (EventInProgress, EventComplete)
                | (EventComplete, EventInProgress)
                | (EventComplete, RunComplete)
        )
    }

    /// Pure transition: the next state, or the error naming both ends.
    pub fn advance(self, to: RunState) -> Result<RunState, RunStateError> {
        if self.can_transition(to) {
            Ok(to)
        } else {
            Err(RunStateError::InvalidTransition { from: self, to })
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::GeometryReady => "geometry-ready",
            Self::EventInProgress => "event-in-progress",
            Self::EventComplete => "event-complete",
            Self::RunComplete => "run-complete",
        };
        write!(f, "{name}")
    }
}

/// Errors from illegal lifecycle transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStateError {
    /// The requested transition is not part of the lifecycle.
    InvalidTransition {
        /// State the run was in.
        from: RunState,
        /// State that was requested.
        to: RunState,
    },
}

impl fmt::Display for RunStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid lifecycle transition {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for RunStateError {}
