// Copyright 2025 Cowboy AI, LLC.

//! Record store backends for workflow state
//!
//! The store holds the latest [`WorkflowState`] per record id. History is
//! carried by events, not by the store, so `save` always replaces the
//! previous value. Handlers are generic over [`RecordStore`] and never care
//! which backend is underneath.

use crate::errors::StoreError;
use crate::identifiers::RecordId;
use crate::workflow::state::WorkflowState;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::debug;
use uuid::Uuid;

/// Storage abstraction for workflow state keyed by record id
pub trait RecordStore: Send + Sync {
    /// Load the state stored under `id`
    fn load(&self, id: RecordId) -> Result<Option<WorkflowState>, StoreError>;

    /// Store `state` under `id`, replacing any previous value
    fn save(&self, id: RecordId, state: &WorkflowState) -> Result<(), StoreError>;
}

/// In-memory store backed by a shared map
///
/// Clones share the same map, so a handler under test and the test itself
/// observe the same records.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<RecordId, WorkflowState>>>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load(&self, id: RecordId) -> Result<Option<WorkflowState>, StoreError> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }

    fn save(&self, id: RecordId, state: &WorkflowState) -> Result<(), StoreError> {
        self.records.write().unwrap().insert(id, state.clone());
        Ok(())
    }
}

/// File-backed store that keeps the whole record map in one JSON document
///
/// Keys are record ids in canonical uuid form; a missing file reads as an
/// empty store. Every save rewrites the document, which suits the modest
/// record counts of a single practice.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over `path`
    ///
    /// The file is created on first save; it does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<RecordId, WorkflowState>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let document: BTreeMap<String, WorkflowState> = serde_json::from_str(&raw)?;
        let mut records = HashMap::with_capacity(document.len());
        for (key, state) in document {
            let uuid = Uuid::parse_str(&key).map_err(|e| StoreError::InvalidKey {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            records.insert(RecordId::from_uuid(uuid), state);
        }
        Ok(records)
    }

    fn write_all(&self, records: &HashMap<RecordId, WorkflowState>) -> Result<(), StoreError> {
        // BTreeMap keeps the document diffable across rewrites.
        let document: BTreeMap<String, &WorkflowState> = records
            .iter()
            .map(|(id, state)| (id.to_string(), state))
            .collect();

        let raw = serde_json::to_string_pretty(&document)?;
        std::fs::write(&self.path, raw)?;
        debug!(
            path = %self.path.display(),
            records = document.len(),
            "record store written"
        );
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, id: RecordId) -> Result<Option<WorkflowState>, StoreError> {
        let mut records = self.read_all()?;
        Ok(records.remove(&id))
    }

    fn save(&self, id: RecordId, state: &WorkflowState) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        records.insert(id, state.clone());
        self.write_all(&records)
    }
}
