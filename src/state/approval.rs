//! Human-in-the-loop approval state machine.
//!
//! Each assistant message that carries an email draft awaiting consent owns
//! one approval state. Both decisions follow the same shape: an optimistic
//! local transition, a background confirmation call to the backend, and a
//! revert to `Pending` (allowing retry) if that call fails.

/// Approval lifecycle for one proposed side-effecting action.
///
/// Transitions:
/// - `Pending -> Sending` on an approve decision
/// - `Pending -> Rejected` on a reject decision (optimistic)
/// - `Sending -> Sent` when the backend confirms an approval
/// - `Sending -> Pending` when an approval confirmation fails
/// - `Rejected -> Pending` when a rejection confirmation fails
///
/// `Sent` and a confirmed `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalStatus {
    /// Awaiting a user decision
    #[default]
    Pending,
    /// User approved; backend confirmation in flight
    Sending,
    /// Backend confirmed the action was executed
    Sent,
    /// User rejected the action
    Rejected,
}

impl ApprovalStatus {
    /// Whether the user can still make a decision.
    pub fn can_decide(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }

    /// Whether a confirmation call is currently in flight.
    pub fn in_flight(&self) -> bool {
        matches!(self, ApprovalStatus::Sending)
    }

    /// Apply a user decision. Guarded: only `Pending` transitions; any
    /// other state is returned unchanged.
    pub fn decide(self, approved: bool) -> Self {
        match (self, approved) {
            (ApprovalStatus::Pending, true) => ApprovalStatus::Sending,
            (ApprovalStatus::Pending, false) => ApprovalStatus::Rejected,
            (other, _) => other,
        }
    }

    /// Apply the backend's confirmation outcome for a decision.
    ///
    /// A failed confirmation reverts to `Pending` so the user can retry,
    /// on both the approve and the reject path.
    pub fn resolve(self, approved: bool, success: bool) -> Self {
        match (self, approved, success) {
            (ApprovalStatus::Sending, true, true) => ApprovalStatus::Sent,
            (ApprovalStatus::Sending, true, false) => ApprovalStatus::Pending,
            (ApprovalStatus::Rejected, false, false) => ApprovalStatus::Pending,
            // Confirmed rejection, or a resolution that no longer matches
            // the current state (e.g. stale result): leave state alone.
            (other, _, _) => other,
        }
    }
}
