//! The transition rule for audit record workflows
//!
//! [`request_transition`] is a pure, synchronous function over an immutable
//! [`WorkflowState`]: it performs no I/O, reads no clock, and generates no
//! ids, so identical inputs always produce identical outputs. Callers own
//! persistence and re-rendering; the engine owns only the decision.
//!
//! Concurrency is the caller's concern as well. The engine trusts the state
//! it is handed to be the latest known one — serializing transition requests
//! per record (one in-flight update per record id) is what keeps two racing
//! requests from both succeeding against the same stale state.

use crate::errors::TransitionError;
use crate::workflow::stage::Stage;
use crate::workflow::state::WorkflowState;
use serde::{Deserialize, Serialize};

/// Facts supplied alongside a transition request
///
/// These are read-only inputs to validation, owned by the caller: document
/// presence comes from the record store, the reason from the operator. They
/// only matter at the `Handover` branch; requests within the ordered prefix
/// ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    /// Whether at least one source document is attached to the record
    pub has_source_documents: bool,

    /// Reason to record when requesting `Return`; ignored for other targets
    pub return_reason: Option<String>,
}

impl TransitionContext {
    /// Create a context with the given document fact and no reason
    pub fn new(has_source_documents: bool) -> Self {
        Self {
            has_source_documents,
            return_reason: None,
        }
    }

    /// Attach a return reason to this context
    pub fn with_return_reason(mut self, reason: impl Into<String>) -> Self {
        self.return_reason = Some(reason.into());
        self
    }
}

/// Decide whether moving `state` to `target` is legal and, if so, apply it.
///
/// The rules, in the order they are checked:
///
/// 1. A record at `Return` or `Submit` accepts nothing further
///    ([`TransitionError::AlreadyTerminal`]).
/// 2. Within the ordered prefix, only the immediate next stage is legal.
///    Requests that go backward, skip ahead, or re-confirm the current
///    stage are all [`TransitionError::OutOfOrder`] — re-confirmation is
///    not a silent success, so an already-applied action cannot be recorded
///    twice.
/// 3. `Return` and `Submit` are reachable only from `Handover`, require at
///    least one source document ([`TransitionError::MissingDocuments`]),
///    and `Return` additionally requires a non-empty reason
///    ([`TransitionError::ReasonRequired`]). Whitespace-only reasons count
///    as empty; accepted reasons are recorded trimmed.
///
/// On success a new [`WorkflowState`] is returned and the previous value is
/// superseded; it is never mutated in place, which keeps the transition
/// auditable.
///
/// # Examples
///
/// ```rust
/// use audit_workflow::{request_transition, Stage, TransitionContext, WorkflowState};
///
/// let opened = WorkflowState::new();
///
/// // Documents are irrelevant before the branch point.
/// let drafting = request_transition(&opened, Stage::DraftAccount, &TransitionContext::default())?;
/// assert_eq!(drafting.current_stage(), Stage::DraftAccount);
///
/// // Skipping ahead is rejected and the input is left untouched.
/// assert!(request_transition(&drafting, Stage::Handover, &TransitionContext::default()).is_err());
/// assert_eq!(drafting.current_stage(), Stage::DraftAccount);
/// # Ok::<(), audit_workflow::TransitionError>(())
/// ```
pub fn request_transition(
    state: &WorkflowState,
    target: Stage,
    context: &TransitionContext,
) -> Result<WorkflowState, TransitionError> {
    let current = state.current_stage();

    if current.is_terminal() {
        return Err(TransitionError::AlreadyTerminal { stage: current });
    }

    match target {
        Stage::Bookkeep | Stage::DraftAccount | Stage::Finalize | Stage::Handover => {
            if current.next() == Some(target) {
                Ok(WorkflowState::advanced(target))
            } else {
                Err(TransitionError::OutOfOrder {
                    from: current,
                    to: target,
                })
            }
        }
        Stage::Return | Stage::Submit => {
            if current != Stage::Handover {
                return Err(TransitionError::OutOfOrder {
                    from: current,
                    to: target,
                });
            }
            if !context.has_source_documents {
                return Err(TransitionError::MissingDocuments);
            }
            match target {
                Stage::Return => match usable_reason(context) {
                    Some(reason) => Ok(WorkflowState::returned(reason)),
                    None => Err(TransitionError::ReasonRequired),
                },
                _ => Ok(WorkflowState::advanced(Stage::Submit)),
            }
        }
    }
}

/// The stages a transition request could currently name without an ordering
/// rejection; empty once the record is terminal.
///
/// Intended for stage indicators in a presentation layer. Document and
/// reason preconditions still apply when the transition is actually
/// requested.
pub fn allowed_targets(state: &WorkflowState) -> Vec<Stage> {
    state.current_stage().successors()
}

/// A usable reason is non-empty once surrounding whitespace is stripped.
fn usable_reason(context: &TransitionContext) -> Option<String> {
    context
        .return_reason
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_to(stage: Stage) -> WorkflowState {
        let mut state = WorkflowState::new();
        while state.current_stage() != stage {
            let next = state
                .current_stage()
                .next()
                .expect("walk target must sit in the ordered prefix");
            state = request_transition(&state, next, &TransitionContext::default()).unwrap();
        }
        state
    }

    #[test]
    fn test_documents_irrelevant_before_handover() {
        let state = WorkflowState::new();
        let context = TransitionContext::new(false);

        let next = request_transition(&state, Stage::DraftAccount, &context).unwrap();
        assert_eq!(next.current_stage(), Stage::DraftAccount);
        assert_eq!(next.return_reason(), None);
    }

    #[test]
    fn test_submit_requires_documents() {
        let state = walk_to(Stage::Handover);

        let err = request_transition(&state, Stage::Submit, &TransitionContext::new(false))
            .unwrap_err();
        assert_eq!(err, TransitionError::MissingDocuments);

        // State is a value; the failed request changed nothing.
        assert_eq!(state.current_stage(), Stage::Handover);
    }

    #[test]
    fn test_return_requires_reason() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(true).with_return_reason("");

        let err = request_transition(&state, Stage::Return, &context).unwrap_err();
        assert_eq!(err, TransitionError::ReasonRequired);
    }

    #[test]
    fn test_whitespace_reason_counts_as_empty() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(true).with_return_reason("   \t");

        let err = request_transition(&state, Stage::Return, &context).unwrap_err();
        assert_eq!(err, TransitionError::ReasonRequired);
    }

    #[test]
    fn test_return_with_reason_and_documents() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(true).with_return_reason("Incomplete ledger");

        let returned = request_transition(&state, Stage::Return, &context).unwrap();
        assert_eq!(returned.current_stage(), Stage::Return);
        assert_eq!(returned.return_reason(), Some("Incomplete ledger"));
    }

    #[test]
    fn test_accepted_reason_is_trimmed() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(true).with_return_reason("  missing invoices  ");

        let returned = request_transition(&state, Stage::Return, &context).unwrap();
        assert_eq!(returned.return_reason(), Some("missing invoices"));
    }

    #[test]
    fn test_missing_documents_checked_before_reason() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(false).with_return_reason("");

        let err = request_transition(&state, Stage::Return, &context).unwrap_err();
        assert_eq!(err, TransitionError::MissingDocuments);
    }

    #[test]
    fn test_terminal_requests_rejected_before_handover() {
        let state = walk_to(Stage::Finalize);

        let next = request_transition(&state, Stage::Handover, &TransitionContext::default())
            .unwrap();
        assert_eq!(next.current_stage(), Stage::Handover);

        let err = request_transition(&state, Stage::Submit, &TransitionContext::new(true))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::OutOfOrder {
                from: Stage::Finalize,
                to: Stage::Submit,
            }
        );
    }

    #[test]
    fn test_skip_ahead_rejected() {
        let state = WorkflowState::new();

        let err = request_transition(&state, Stage::Finalize, &TransitionContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::OutOfOrder {
                from: Stage::Bookkeep,
                to: Stage::Finalize,
            }
        );
    }

    #[test]
    fn test_reconfirming_current_stage_rejected() {
        let state = walk_to(Stage::DraftAccount);

        let err = request_transition(&state, Stage::DraftAccount, &TransitionContext::default())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::OutOfOrder {
                from: Stage::DraftAccount,
                to: Stage::DraftAccount,
            }
        );
    }

    #[test]
    fn test_backward_request_rejected() {
        let state = walk_to(Stage::Finalize);

        let err = request_transition(&state, Stage::Bookkeep, &TransitionContext::default())
            .unwrap_err();
        assert!(matches!(err, TransitionError::OutOfOrder { .. }));
    }

    #[test]
    fn test_terminal_states_absorb_everything() {
        let handover = walk_to(Stage::Handover);
        let submitted =
            request_transition(&handover, Stage::Submit, &TransitionContext::new(true)).unwrap();
        assert_eq!(submitted.current_stage(), Stage::Submit);

        for target in crate::workflow::stage::ALL_STAGES {
            let err = request_transition(&submitted, target, &TransitionContext::new(true))
                .unwrap_err();
            assert_eq!(
                err,
                TransitionError::AlreadyTerminal {
                    stage: Stage::Submit,
                }
            );
        }
    }

    #[test]
    fn test_returned_record_is_terminal() {
        let handover = walk_to(Stage::Handover);
        let context = TransitionContext::new(true).with_return_reason("unresolved queries");
        let returned = request_transition(&handover, Stage::Return, &context).unwrap();

        let err = request_transition(&returned, Stage::Submit, &TransitionContext::new(true))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::AlreadyTerminal {
                stage: Stage::Return,
            }
        );
    }

    #[test]
    fn test_rejection_is_repeatable() {
        let state = walk_to(Stage::Handover);
        let context = TransitionContext::new(false);

        let first = request_transition(&state, Stage::Submit, &context).unwrap_err();
        let second = request_transition(&state, Stage::Submit, &context).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(state.current_stage(), Stage::Handover);
    }

    #[test]
    fn test_allowed_targets_follow_the_graph() {
        assert_eq!(
            allowed_targets(&WorkflowState::new()),
            vec![Stage::DraftAccount]
        );
        assert_eq!(
            allowed_targets(&walk_to(Stage::Handover)),
            vec![Stage::Return, Stage::Submit]
        );

        let submitted = request_transition(
            &walk_to(Stage::Handover),
            Stage::Submit,
            &TransitionContext::new(true),
        )
        .unwrap();
        assert!(allowed_targets(&submitted).is_empty());
    }
}
