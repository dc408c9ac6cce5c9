//! Events recorded as audit record workflows move
//!
//! Every accepted transition is captured as a [`StageTransition`] so the
//! history of a record can be replayed and audited. [`RecordEvent`] is the
//! record-scoped view handed to downstream consumers (projections, audit
//! trails, notifications).

use crate::identifiers::RecordId;
use crate::workflow::stage::Stage;
use crate::workflow::state::WorkflowState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record of one accepted stage transition
///
/// Transitions are append-only facts: each carries its own id and the
/// moment it was accepted, so two transitions over the same pair of stages
/// remain distinguishable in a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    /// Unique identifier for this transition
    pub transition_id: Uuid,

    /// Stage the record was in when the request was accepted
    pub from: Stage,

    /// Stage the record moved to
    pub to: Stage,

    /// Reason recorded when the transition ended at `Return`
    pub return_reason: Option<String>,

    /// When the transition was accepted
    pub occurred_at: DateTime<Utc>,
}

impl StageTransition {
    /// Capture the move from `from` into `new_state`
    pub(crate) fn capture(from: Stage, new_state: &WorkflowState) -> Self {
        Self {
            transition_id: Uuid::new_v4(),
            from,
            to: new_state.current_stage(),
            return_reason: new_state.return_reason().map(str::to_string),
            occurred_at: Utc::now(),
        }
    }
}

/// Events emitted by the record workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordEvent {
    /// A record was opened at the start of the pipeline
    RecordOpened {
        /// The record that was opened
        record_id: RecordId,

        /// When the record was opened
        opened_at: DateTime<Utc>,
    },

    /// A record advanced one step within the ordered stages
    StageAdvanced {
        /// The record that moved
        record_id: RecordId,

        /// Stage the record left
        from: Stage,

        /// Stage the record entered
        to: Stage,

        /// When the record moved
        occurred_at: DateTime<Utc>,
    },

    /// A record was handed back to the client
    RecordReturned {
        /// The record that was returned
        record_id: RecordId,

        /// Why the record went back
        reason: String,

        /// When the record was returned
        occurred_at: DateTime<Utc>,
    },

    /// A record was submitted to the authority
    RecordSubmitted {
        /// The record that was submitted
        record_id: RecordId,

        /// When the record was submitted
        occurred_at: DateTime<Utc>,
    },
}

impl RecordEvent {
    /// Build the event for an accepted transition on `record_id`
    pub(crate) fn from_transition(record_id: RecordId, transition: &StageTransition) -> Self {
        match transition.to {
            Stage::Return => RecordEvent::RecordReturned {
                record_id,
                reason: transition.return_reason.clone().unwrap_or_default(),
                occurred_at: transition.occurred_at,
            },
            Stage::Submit => RecordEvent::RecordSubmitted {
                record_id,
                occurred_at: transition.occurred_at,
            },
            _ => RecordEvent::StageAdvanced {
                record_id,
                from: transition.from,
                to: transition.to,
                occurred_at: transition.occurred_at,
            },
        }
    }

    /// Get the record this event belongs to
    pub fn record_id(&self) -> RecordId {
        match self {
            RecordEvent::RecordOpened { record_id, .. } => *record_id,
            RecordEvent::StageAdvanced { record_id, .. } => *record_id,
            RecordEvent::RecordReturned { record_id, .. } => *record_id,
            RecordEvent::RecordSubmitted { record_id, .. } => *record_id,
        }
    }

    /// Get the event type name for routing and logging
    pub fn event_type(&self) -> &'static str {
        match self {
            RecordEvent::RecordOpened { .. } => "RecordOpened",
            RecordEvent::StageAdvanced { .. } => "StageAdvanced",
            RecordEvent::RecordReturned { .. } => "RecordReturned",
            RecordEvent::RecordSubmitted { .. } => "RecordSubmitted",
        }
    }
}
