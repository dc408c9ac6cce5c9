// Copyright 2025 Cowboy AI, LLC.

//! Error types for record workflow operations

use crate::identifiers::RecordId;
use crate::workflow::stage::Stage;
use thiserror::Error;

/// Reasons a transition request is rejected
///
/// Each variant names exactly one violated rule, so callers can branch on
/// the cause and presentation layers can render a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The record already reached `Return` or `Submit`
    #[error("record is already at terminal stage {stage}; no further transitions are possible")]
    AlreadyTerminal {
        /// The terminal stage the record sits at
        stage: Stage,
    },

    /// The requested stage is not the immediate next one
    #[error("cannot move from {from} to {to}: processes must be completed in order")]
    OutOfOrder {
        /// Stage the record is currently in
        from: Stage,
        /// Stage that was requested
        to: Stage,
    },

    /// Leaving `Handover` requires at least one source document
    #[error("at least one source document is required before the record can leave Handover")]
    MissingDocuments,

    /// Returning a record requires a non-empty reason
    #[error("a non-empty return reason is required to return the record")]
    ReasonRequired,
}

impl TransitionError {
    /// Whether retrying the same request with corrected inputs could succeed
    ///
    /// `AlreadyTerminal` is final; the other rejections can be cured by
    /// naming the right stage, attaching documents, or supplying a reason.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TransitionError::AlreadyTerminal { .. })
    }
}

/// Result type alias for transition decisions
pub type TransitionResult<T> = Result<T, TransitionError>;

/// Errors raised by record store backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state could not be encoded or decoded
    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted key does not parse as a record id
    #[error("invalid record key '{key}': {reason}")]
    InvalidKey {
        /// The key as found in the backend
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// Backend-specific failure
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors returned by the workflow command handlers
#[derive(Debug, Error)]
pub enum CommandError {
    /// No record exists under the given id
    #[error("record {0} not found")]
    RecordNotFound(RecordId),

    /// A record already exists under the given id
    #[error("record {0} is already open")]
    AlreadyOpen(RecordId),

    /// The transition request was rejected by the workflow rules
    #[error(transparent)]
    Rejected(#[from] TransitionError),

    /// The record store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CommandError {
    /// Whether this error means the record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::RecordNotFound(_))
    }

    /// The underlying transition rejection, if that is what this error is
    pub fn rejection(&self) -> Option<&TransitionError> {
        match self {
            CommandError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
