//! Handler-over-store integration: what gets persisted, and when

use audit_workflow::{
    CommandError, InMemoryRecordStore, JsonFileStore, OpenRecord, RecordStore, RequestTransition,
    Stage, StoreError, TransitionContext, WorkflowCommandHandler,
};
use uuid::Uuid;

fn temp_store_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("audit-workflow-tests-{}.json", Uuid::new_v4()))
}

#[test]
fn only_accepted_transitions_reach_the_store() {
    let store = InMemoryRecordStore::new();
    let handler = WorkflowCommandHandler::new(store.clone());

    let record_id = OpenRecord::new().record_id;
    handler.handle_open(OpenRecord { record_id }).unwrap();

    handler
        .handle_request(RequestTransition::new(record_id, Stage::DraftAccount))
        .unwrap();

    // An out-of-order request must not move the stored record.
    let err = handler
        .handle_request(RequestTransition::new(record_id, Stage::Handover))
        .unwrap_err();
    assert!(err.rejection().is_some());

    let stored = store.load(record_id).unwrap().unwrap();
    assert_eq!(stored.current_stage(), Stage::DraftAccount);
}

#[test]
fn file_backed_records_survive_reopening() {
    let path = temp_store_path();
    let record_id = OpenRecord::new().record_id;

    {
        let handler = WorkflowCommandHandler::new(JsonFileStore::new(&path));
        handler.handle_open(OpenRecord { record_id }).unwrap();
        handler
            .handle_request(RequestTransition::new(record_id, Stage::DraftAccount))
            .unwrap();
        handler
            .handle_request(RequestTransition::new(record_id, Stage::Finalize))
            .unwrap();
    }

    // A fresh handler over the same file picks up where the last one left off.
    let handler = WorkflowCommandHandler::new(JsonFileStore::new(&path));
    let (state, _) = handler
        .handle_request(RequestTransition::new(record_id, Stage::Handover))
        .unwrap();
    assert_eq!(state.current_stage(), Stage::Handover);

    let (state, _) = handler
        .handle_request(
            RequestTransition::new(record_id, Stage::Submit)
                .with_context(TransitionContext::new(true)),
        )
        .unwrap();
    assert!(state.is_terminal());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn return_reason_round_trips_through_the_file() {
    let path = temp_store_path();
    let record_id = OpenRecord::new().record_id;

    {
        let handler = WorkflowCommandHandler::new(JsonFileStore::new(&path));
        handler.handle_open(OpenRecord { record_id }).unwrap();
        for target in [Stage::DraftAccount, Stage::Finalize, Stage::Handover] {
            handler
                .handle_request(RequestTransition::new(record_id, target))
                .unwrap();
        }
        handler
            .handle_request(
                RequestTransition::new(record_id, Stage::Return).with_context(
                    TransitionContext::new(true).with_return_reason("bank feed not reconciled"),
                ),
            )
            .unwrap();
    }

    let store = JsonFileStore::new(&path);
    let state = store.load(record_id).unwrap().unwrap();
    assert_eq!(state.current_stage(), Stage::Return);
    assert_eq!(state.return_reason(), Some("bank feed not reconciled"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn store_failures_surface_as_command_errors() {
    let path = temp_store_path();
    std::fs::write(&path, "{ not valid json").unwrap();

    let handler = WorkflowCommandHandler::new(JsonFileStore::new(&path));
    let err = handler
        .handle_request(RequestTransition::new(
            OpenRecord::new().record_id,
            Stage::DraftAccount,
        ))
        .unwrap_err();

    match err {
        CommandError::Store(StoreError::Serialization(_)) => {}
        other => panic!("expected a serialization store error, got {other:?}"),
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn two_records_move_independently() {
    let store = InMemoryRecordStore::new();
    let handler = WorkflowCommandHandler::new(store.clone());

    let first = OpenRecord::new().record_id;
    let second = OpenRecord::new().record_id;
    handler.handle_open(OpenRecord { record_id: first }).unwrap();
    handler.handle_open(OpenRecord { record_id: second }).unwrap();

    handler
        .handle_request(RequestTransition::new(first, Stage::DraftAccount))
        .unwrap();

    let first_state = store.load(first).unwrap().unwrap();
    let second_state = store.load(second).unwrap().unwrap();
    assert_eq!(first_state.current_stage(), Stage::DraftAccount);
    assert_eq!(second_state.current_stage(), Stage::Bookkeep);
}
