//! # Audit Workflow
//!
//! Core workflow engine for moving audit records through an accounting
//! practice, from bookkeeping to the final hand-off.
//!
//! This crate provides the building blocks for the record pipeline:
//! - **Stages**: The fixed pipeline `Bookkeep → DraftAccount → Finalize →
//!   Handover`, ending in either `Return` or `Submit`
//! - **Workflow State**: An immutable value holding a record's current
//!   stage and, once returned, the reason
//! - **Transition Engine**: A pure function deciding whether a requested
//!   move is legal, with a typed error for every way it can be refused
//! - **Events**: Facts describing accepted transitions, for audit trails
//!   and projections
//! - **Commands**: Requests to open records and move them, processed by
//!   handlers against a record store
//! - **Record Store**: Pluggable persistence for the latest state per
//!   record
//!
//! ## Design Principles
//!
//! 1. **One Step at a Time**: Only the immediate next stage is ever legal;
//!    skipping, re-confirming, and going backward are all rejected
//! 2. **Immutability**: Transitions produce new state values rather than
//!    mutating in place
//! 3. **Typed Rejections**: Every refusal names the exact rule that was
//!    violated, so callers can branch on the cause
//! 4. **Purity**: The decision itself performs no I/O and reads no clock;
//!    persistence and timestamps live at the edges
//! 5. **Terminal Means Terminal**: A returned or submitted record accepts
//!    nothing further

#![warn(missing_docs)]

mod command_handlers;
mod commands;
mod errors;
mod identifiers;
pub mod store;
pub mod workflow;

// Re-export core types
pub use command_handlers::WorkflowCommandHandler;
pub use commands::{OpenRecord, RequestTransition};
pub use errors::{CommandError, StoreError, TransitionError, TransitionResult};
pub use identifiers::RecordId;
pub use store::{InMemoryRecordStore, JsonFileStore, RecordStore};
pub use workflow::{
    allowed_targets, request_transition, RecordEvent, Stage, StageTransition, TransitionContext,
    WorkflowState, ALL_STAGES, ORDERED_STAGES,
};
