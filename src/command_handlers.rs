// Copyright 2025 Cowboy AI, LLC.

//! Command handlers for the record workflow
//!
//! Handlers load state from a [`RecordStore`], apply the workflow rules,
//! persist the outcome, and report what happened as an event. A rejected
//! request leaves the store untouched, so the record still renders exactly
//! as it did before the attempt.

use crate::commands::{OpenRecord, RequestTransition};
use crate::errors::CommandError;
use crate::store::RecordStore;
use crate::workflow::engine::request_transition;
use crate::workflow::events::{RecordEvent, StageTransition};
use crate::workflow::state::WorkflowState;
use chrono::Utc;
use tracing::{info, warn};

/// Processes record workflow commands against a store
pub struct WorkflowCommandHandler<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> WorkflowCommandHandler<S> {
    /// Create a handler over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The store this handler works against
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a new record at the start of the pipeline
    ///
    /// Fails with [`CommandError::AlreadyOpen`] when the id is already in
    /// use, so re-sending an open command cannot reset a record's progress.
    pub fn handle_open(
        &self,
        command: OpenRecord,
    ) -> Result<(WorkflowState, RecordEvent), CommandError> {
        let OpenRecord { record_id } = command;

        if self.store.load(record_id)?.is_some() {
            return Err(CommandError::AlreadyOpen(record_id));
        }

        let state = WorkflowState::new();
        self.store.save(record_id, &state)?;

        info!(
            record_id = %record_id,
            stage = %state.current_stage(),
            "record opened"
        );

        let event = RecordEvent::RecordOpened {
            record_id,
            opened_at: Utc::now(),
        };
        Ok((state, event))
    }

    /// Apply a transition request to a stored record
    ///
    /// Loads the latest state, asks the workflow rules for a decision, and
    /// persists the new state only when the request is accepted. The new
    /// state and the event describing the move are returned to the caller.
    pub fn handle_request(
        &self,
        command: RequestTransition,
    ) -> Result<(WorkflowState, RecordEvent), CommandError> {
        let RequestTransition {
            record_id,
            target,
            context,
        } = command;

        let current = self
            .store
            .load(record_id)?
            .ok_or(CommandError::RecordNotFound(record_id))?;

        let next = match request_transition(&current, target, &context) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    record_id = %record_id,
                    from = %current.current_stage(),
                    to = %target,
                    error = %err,
                    "transition rejected"
                );
                return Err(CommandError::Rejected(err));
            }
        };

        self.store.save(record_id, &next)?;

        let transition = StageTransition::capture(current.current_stage(), &next);
        info!(
            record_id = %record_id,
            from = %transition.from,
            to = %transition.to,
            "transition accepted"
        );

        let event = RecordEvent::from_transition(record_id, &transition);
        Ok((next, event))
    }
}
