//! Dispatch serialization for the active session.

/// Whether a chat dispatch is currently in flight.
///
/// Replaces an ad hoc busy boolean with a guarded two-state machine: a
/// session sends at most one chat request at a time, and the state returns
/// to `Idle` on every exit path (success or failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    /// No dispatch in flight; sends are allowed
    #[default]
    Idle,
    /// A chat request is in flight; further sends are rejected
    Dispatching,
}

impl DispatchState {
    /// Attempt to begin a dispatch. Returns `false` (and stays put) if one
    /// is already in flight.
    pub fn try_begin(&mut self) -> bool {
        match self {
            DispatchState::Idle => {
                *self = DispatchState::Dispatching;
                true
            }
            DispatchState::Dispatching => false,
        }
    }

    /// Mark the in-flight dispatch as finished.
    pub fn finish(&mut self) {
        *self = DispatchState::Idle;
    }

    /// Whether a dispatch is in flight.
    pub fn is_dispatching(&self) -> bool {
        matches!(self, DispatchState::Dispatching)
    }
}
