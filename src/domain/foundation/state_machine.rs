//! State machine trait for lifecycle status enums.

use super::DomainError;

/// Trait for status enums that represent state machines.
///
/// Implementors define which transitions are valid; `transition_to` then
/// rejects anything else. Lifecycle states only ever advance, so no
/// implementor should permit a transition back to an earlier state.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::validation(format!(
                "cannot transition from {:?} to {:?}",
                self, target
            )))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lending::LoanState;

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = LoanState::Proposed.transition_to(LoanState::Approved);
        assert_eq!(result, Ok(LoanState::Approved));
    }

    #[test]
    fn transition_to_fails_for_skipped_state() {
        let result = LoanState::Proposed.transition_to(LoanState::Invested);
        assert!(result.is_err());
    }

    #[test]
    fn transition_to_fails_for_regression() {
        let result = LoanState::Approved.transition_to(LoanState::Proposed);
        assert!(result.is_err());
    }

    #[test]
    fn disbursed_is_terminal() {
        assert!(LoanState::Disbursed.is_terminal());
        assert!(!LoanState::Proposed.is_terminal());
        assert!(!LoanState::Approved.is_terminal());
        assert!(!LoanState::Invested.is_terminal());
    }
}
