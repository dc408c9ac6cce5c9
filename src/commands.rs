//! Commands for the record workflow
//!
//! Commands represent intentions to change record state. They are processed
//! by command handlers which apply the workflow rules and emit events.

use crate::identifiers::RecordId;
use crate::workflow::engine::TransitionContext;
use crate::workflow::stage::Stage;
use serde::{Deserialize, Serialize};

/// Open a new record at the start of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRecord {
    /// Identifier for the new record
    pub record_id: RecordId,
}

impl OpenRecord {
    /// Open a record under a freshly generated id
    pub fn new() -> Self {
        Self {
            record_id: RecordId::new(),
        }
    }
}

impl Default for OpenRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Request that a record move to `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTransition {
    /// The record to move
    pub record_id: RecordId,

    /// The stage being requested
    pub target: Stage,

    /// Facts the workflow rules check at the branch point
    pub context: TransitionContext,
}

impl RequestTransition {
    /// Request a plain advance with no documents and no reason attached
    pub fn new(record_id: RecordId, target: Stage) -> Self {
        Self {
            record_id,
            target,
            context: TransitionContext::default(),
        }
    }

    /// Replace the context carried by this request
    pub fn with_context(mut self, context: TransitionContext) -> Self {
        self.context = context;
        self
    }
}
