//! End-to-end board tests: drag, validate, persist, and roll back against
//! a live store over the in-memory backend.

use crate::board::{DropSpot, MoveOutcome, MoveStatus, PipelineBoard};
use crate::errors::StageError;
use crate::events::{CollectingEventSink, EventSink};
use crate::model::NewStage;
use crate::store::{MemoryBackend, StageBackend, StageStore};
use crate::testing::{application_in, flat_funnel, stage, FailingBackend, RecordingPersistence};
use pretty_assertions::assert_eq;
use std::sync::Arc;

async fn funnel_store() -> StageStore {
    let backend = Arc::new(MemoryBackend::with_rows(flat_funnel()));
    let store = StageStore::new(backend as Arc<dyn StageBackend>, "co-1");
    store.fetch_stages().await.unwrap();
    store
}

#[tokio::test]
async fn test_valid_move_persists_the_resolved_stage_id() {
    let store = funnel_store().await;
    let sink = Arc::new(CollectingEventSink::new());
    let mut board = PipelineBoard::new(
        store.stages(),
        vec![application_in("app-1", "Applied")],
    )
    .with_event_sink(Arc::clone(&sink) as Arc<dyn EventSink>);
    let persistence = RecordingPersistence::new();

    assert!(board.begin_drag("app-1"));
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Offer".into())), &store, &persistence)
        .await;

    assert!(matches!(outcome, MoveOutcome::Moved));
    assert_eq!(board.applications()[0].current_stage.name, "Offer");
    // The validated *name* was translated back to the stage *id* for storage.
    assert_eq!(persistence.moves(), vec![("app-1".to_string(), "c".to_string())]);
    assert_eq!(board.commands().len(), 1);
    assert_eq!(board.commands()[0].status, MoveStatus::Confirmed);
    assert_eq!(sink.event_types(), vec!["move.validated", "move.persisted"]);
}

#[tokio::test]
async fn test_drop_on_card_resolves_that_cards_stage() {
    let store = funnel_store().await;
    let mut board = PipelineBoard::new(
        store.stages(),
        vec![
            application_in("app-1", "Applied"),
            application_in("app-2", "Screen"),
        ],
    );
    let persistence = RecordingPersistence::new();

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Card("app-2".into())), &store, &persistence)
        .await;

    assert!(matches!(outcome, MoveOutcome::Moved));
    assert_eq!(board.applications()[0].current_stage.name, "Screen");
}

#[tokio::test]
async fn test_backward_move_is_rejected_without_side_effects() {
    let store = funnel_store().await;
    let sink = Arc::new(CollectingEventSink::new());
    let mut board = PipelineBoard::new(
        store.stages(),
        vec![application_in("app-1", "Offer")],
    )
    .with_event_sink(Arc::clone(&sink) as Arc<dyn EventSink>);
    let persistence = RecordingPersistence::new();

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Applied".into())), &store, &persistence)
        .await;

    assert!(matches!(outcome, MoveOutcome::Rejected));
    assert_eq!(board.applications()[0].current_stage.name, "Offer");
    assert!(persistence.moves().is_empty());
    assert!(board.commands().is_empty());
    assert_eq!(sink.event_types(), vec!["move.rejected"]);
}

#[tokio::test]
async fn test_unresolved_and_same_stage_drops_are_noops() {
    let store = funnel_store().await;
    let mut board = PipelineBoard::new(
        store.stages(),
        vec![application_in("app-1", "Screen")],
    );
    let persistence = RecordingPersistence::new();

    board.begin_drag("app-1");
    let outcome = board.end_drag(None, &store, &persistence).await;
    assert!(matches!(outcome, MoveOutcome::NoTarget));

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Screen".into())), &store, &persistence)
        .await;
    assert!(matches!(outcome, MoveOutcome::SameStage));

    assert!(persistence.moves().is_empty());
}

#[tokio::test]
async fn test_persistence_failure_rolls_back_and_logs_the_command() {
    let store = funnel_store().await;
    let sink = Arc::new(CollectingEventSink::new());
    let mut board = PipelineBoard::new(
        store.stages(),
        vec![application_in("app-1", "Applied")],
    )
    .with_event_sink(Arc::clone(&sink) as Arc<dyn EventSink>);
    let persistence =
        RecordingPersistence::failing(StageError::update("app-1", "write timed out"));

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Offer".into())), &store, &persistence)
        .await;

    assert!(matches!(outcome, MoveOutcome::Failed(_)));
    // Rolled back: the store never saw the move and the board no longer
    // shows it, but the failed command stays visible in the log.
    assert_eq!(board.applications()[0].current_stage.name, "Applied");
    assert_eq!(board.commands().len(), 1);
    assert_eq!(board.commands()[0].status, MoveStatus::Failed);
    assert_eq!(board.commands()[0].to_stage, "Offer");
    assert_eq!(
        sink.event_types(),
        vec!["move.validated", "move.rolled_back"]
    );
}

#[tokio::test]
async fn test_ambiguous_stage_name_aborts_the_move() {
    // Two active stages named "Screen" in one company: the validator
    // accepts the drag, but the name-to-id translation cannot pick a row.
    let mut rows = flat_funnel();
    rows.push(stage("b2", "Screen", None, 4));
    let backend = Arc::new(MemoryBackend::with_rows(rows));
    let store = StageStore::new(backend as Arc<dyn StageBackend>, "co-1");
    store.fetch_stages().await.unwrap();

    let mut board = PipelineBoard::new(
        store.stages(),
        vec![application_in("app-1", "Applied")],
    );
    let persistence = RecordingPersistence::new();

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Screen".into())), &store, &persistence)
        .await;

    assert!(matches!(
        outcome,
        MoveOutcome::Failed(StageError::LookupAmbiguity(_))
    ));
    assert_eq!(board.applications()[0].current_stage.name, "Applied");
    assert!(persistence.moves().is_empty());
    assert_eq!(board.commands()[0].status, MoveStatus::Failed);
}

#[tokio::test]
async fn test_storage_outage_fails_the_move_after_validation() {
    // The board's own snapshot is healthy, but the store cannot resolve
    // the stage id because the backend is down.
    let live = funnel_store().await;
    let broken = StageStore::new(Arc::new(FailingBackend), "co-1");

    let mut board = PipelineBoard::new(
        live.stages(),
        vec![application_in("app-1", "Applied")],
    );
    let persistence = RecordingPersistence::new();

    board.begin_drag("app-1");
    let outcome = board
        .end_drag(Some(DropSpot::Zone("Offer".into())), &broken, &persistence)
        .await;

    assert!(matches!(outcome, MoveOutcome::Failed(StageError::Fetch(_))));
    assert_eq!(board.applications()[0].current_stage.name, "Applied");
    assert!(persistence.moves().is_empty());
}
