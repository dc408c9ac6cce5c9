//! Workflow module for the audit record pipeline
//!
//! This module models the path an audit record takes through an accounting
//! practice:
//! - Stages form a fixed, ordered pipeline with one branching hand-off at
//!   the end (see [`stage`])
//! - State is an immutable value; transitions replace it rather than
//!   mutating it (see [`state`])
//! - [`engine::request_transition`] is the single rule deciding which
//!   requests are accepted
//! - Accepted transitions are captured as events for audit and projection
//!   (see [`events`])

pub mod engine;
pub mod events;
pub mod stage;
pub mod state;

pub use engine::{allowed_targets, request_transition, TransitionContext};
pub use events::{RecordEvent, StageTransition};
pub use stage::{Stage, ALL_STAGES, ORDERED_STAGES};
pub use state::WorkflowState;
