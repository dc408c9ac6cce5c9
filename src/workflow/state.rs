//! Workflow state of a single audit record
//!
//! `WorkflowState` is the value the engine consumes and produces. It is
//! deliberately small: the authoritative stage plus the return reason that
//! exists only once a record has been returned. Everything else the engine
//! needs (document presence, the requested target) is supplied per request
//! and never stored here.

use crate::workflow::stage::Stage;
use serde::{Deserialize, Serialize};

/// Workflow position of one audit record
///
/// Invariant: `return_reason` is `Some` if and only if the record is at
/// [`Stage::Return`]. Fields are private so states can only be built at
/// `Bookkeep` or by the engine applying a legal transition; rehydrated
/// states from a record store are trusted input, like any state the caller
/// supplies.
///
/// The serialized form is the persisted representation expected by record
/// stores: `{ "current_stage": "<stage>", "return_reason": <string|null> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    current_stage: Stage,
    return_reason: Option<String>,
}

impl WorkflowState {
    /// State of a freshly opened record
    ///
    /// Every record starts at `Bookkeep` with no return reason.
    pub fn new() -> Self {
        Self {
            current_stage: Stage::Bookkeep,
            return_reason: None,
        }
    }

    /// State after a legal move to a stage other than `Return`
    pub(crate) fn advanced(stage: Stage) -> Self {
        Self {
            current_stage: stage,
            return_reason: None,
        }
    }

    /// State after a legal move into `Return`, carrying the reason
    pub(crate) fn returned(reason: String) -> Self {
        Self {
            current_stage: Stage::Return,
            return_reason: Some(reason),
        }
    }

    /// The authoritative stage of the record
    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// The recorded return reason, present only at `Return`
    pub fn return_reason(&self) -> Option<&str> {
        self.return_reason.as_deref()
    }

    /// Whether the record has reached a terminal stage
    pub fn is_terminal(&self) -> bool {
        self.current_stage.is_terminal()
    }
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}
