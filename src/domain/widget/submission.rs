//! Submission lifecycle state machine.

use serde::{Deserialize, Serialize};

use crate::domain::card::ServiceError;
use crate::domain::foundation::StateMachine;
use crate::domain::widget::FieldKind;

/// Where a widget is in its validate / tokenize / submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Waiting for a submit.
    #[default]
    Idle,

    /// Running local validation.
    Validating,

    /// Tokenization request issued, callback not yet fired.
    Pending,

    /// Callback fired (success or error).
    Resolved,
}

impl SubmissionState {
    /// True iff a tokenization request is outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }
}

impl StateMachine for SubmissionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionState::*;
        matches!(
            (self, target),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Pending)
                | (Pending, Resolved)
                | (Resolved, Validating)
                | (Resolved, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionState::*;
        match self {
            Idle => vec![Validating],
            Validating => vec![Idle, Pending],
            Pending => vec![Resolved],
            Resolved => vec![Validating, Idle],
        }
    }
}

/// Submit event from the host form, or a synthetic one.
///
/// The widget always suppresses the default action and further
/// propagation; it decides when the form really submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// What a call to `submit` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; no request was issued.
    Invalid(Vec<FieldKind>),

    /// A request was already outstanding; nothing happened.
    AlreadyPending,

    /// The interceptor has been released; nothing happened.
    Released,

    /// Token obtained and the host form submitted.
    Tokenized { token_id: String },

    /// The service rejected the card.
    Rejected(ServiceError),

    /// A token result arrived with no request outstanding.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_moves_only_to_validating() {
        assert_eq!(SubmissionState::Idle.valid_transitions(), vec![SubmissionState::Validating]);
        assert!(SubmissionState::Idle
            .transition_to(SubmissionState::Pending)
            .is_err());
    }

    #[test]
    fn validating_goes_to_pending_or_back_to_idle() {
        let state = SubmissionState::Validating;
        assert_eq!(state.transition_to(SubmissionState::Pending), Ok(SubmissionState::Pending));
        assert_eq!(state.transition_to(SubmissionState::Idle), Ok(SubmissionState::Idle));
    }

    #[test]
    fn pending_resolves_only() {
        let state = SubmissionState::Pending;
        assert!(state.is_pending());
        assert_eq!(state.valid_transitions(), vec![SubmissionState::Resolved]);
        assert!(state.transition_to(SubmissionState::Validating).is_err());
    }

    #[test]
    fn resolved_allows_a_new_cycle() {
        assert!(SubmissionState::Resolved.can_transition_to(&SubmissionState::Validating));
        assert!(!SubmissionState::Resolved.is_pending());
    }

    #[test]
    fn no_state_is_terminal() {
        for state in [
            SubmissionState::Idle,
            SubmissionState::Validating,
            SubmissionState::Pending,
            SubmissionState::Resolved,
        ] {
            assert!(!state.is_terminal());
            for target in state.valid_transitions() {
                assert!(state.can_transition_to(&target));
            }
        }
    }

    #[test]
    fn submit_event_records_suppression() {
        let mut event = SubmitEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        event.stop_immediate_propagation();
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
    }
}
