//! Drag-and-drop move orchestration.
//!
//! Each validated drag becomes an explicit [`MoveCommand`] that goes
//! `Pending` → `Confirmed` or `Failed`. The local application copy is
//! mutated optimistically before the persistence call, and rolled back if
//! the call fails; failed commands stay in the log so the transient
//! optimistic inconsistency is visible after the fact.

use crate::board::grouping::{group_by_stage, skeleton_counts, StageGroup};
use crate::errors::StageError;
use crate::events::{EventSink, NoOpEventSink};
use crate::model::{Application, CurrentStage, Stage};
use crate::store::StageStore;
use crate::transition::is_valid_transition;
use crate::utils::{generate_id, now_utc, Timestamp};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Where a dragged application card was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropSpot {
    /// Directly on a stage column's drop-zone.
    Zone(String),
    /// On another application card; the target stage is that card's
    /// current stage.
    Card(String),
}

/// Persists an accepted move: writes the resolved stage id onto the
/// application record in external storage.
#[async_trait]
pub trait MovePersistence: Send + Sync {
    /// Writes `stage_id` as the application's current stage.
    async fn persist_move(&self, application_id: &str, stage_id: &str)
        -> Result<(), StageError>;
}

/// Lifecycle status of a move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// Optimistically applied locally, persistence in flight.
    Pending,
    /// Persisted.
    Confirmed,
    /// Persistence failed; the local mutation was rolled back.
    Failed,
}

/// One validated drag, recorded through its lifecycle.
#[derive(Debug, Clone)]
pub struct MoveCommand {
    /// Command identifier.
    pub id: String,
    /// The application that moved.
    pub application_id: String,
    /// Stage name the application left.
    pub from_stage: String,
    /// Stage name the application entered.
    pub to_stage: String,
    /// Current lifecycle status.
    pub status: MoveStatus,
    /// When the drag was accepted.
    pub issued_at: Timestamp,
}

/// The result of ending a drag.
#[derive(Debug)]
pub enum MoveOutcome {
    /// No drag was in progress, or no target stage resolved from the drop.
    NoTarget,
    /// The target is the application's current stage; nothing to do.
    SameStage,
    /// The transition rules rejected the move; state unchanged.
    Rejected,
    /// The move was validated and persisted.
    Moved,
    /// The move was validated but persistence failed; the optimistic
    /// local change was rolled back.
    Failed(StageError),
}

/// Applications grouped by stage, with drag-and-drop move orchestration.
///
/// The board holds a local copy of the application list and never writes
/// back into the shared stage snapshot.
pub struct PipelineBoard {
    stages: Arc<Vec<Stage>>,
    applications: Vec<Application>,
    loading: bool,
    dragging: Option<String>,
    commands: Vec<MoveCommand>,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for PipelineBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBoard")
            .field("stages", &self.stages.len())
            .field("applications", &self.applications.len())
            .field("loading", &self.loading)
            .field("dragging", &self.dragging)
            .finish()
    }
}

impl PipelineBoard {
    /// Creates a board over a stage snapshot and an application list.
    #[must_use]
    pub fn new(stages: Arc<Vec<Stage>>, applications: Vec<Application>) -> Self {
        Self {
            stages,
            applications,
            loading: false,
            dragging: None,
            commands: Vec::new(),
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink receiving move lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the stage snapshot after the store republishes.
    pub fn set_stages(&mut self, stages: Arc<Vec<Stage>>) {
        self.stages = stages;
    }

    /// Replaces the local application list after a refetch.
    pub fn set_applications(&mut self, applications: Vec<Application>) {
        self.applications = applications;
    }

    /// Marks the board as loading or loaded. While loading, drags are
    /// ignored and [`Self::skeleton`] drives rendering.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns true while stage or application data is loading.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the board's local application copy.
    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Returns the move command log, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[MoveCommand] {
        &self.commands
    }

    /// Returns the board columns: one group per stage.
    #[must_use]
    pub fn groups(&self) -> Vec<StageGroup> {
        group_by_stage(&self.stages, &self.applications)
    }

    /// Returns per-stage placeholder counts for the loading skeleton.
    #[must_use]
    pub fn skeleton(&self, placeholders: usize) -> Vec<(String, usize)> {
        skeleton_counts(&self.stages, placeholders)
    }

    /// Records the dragged application. Returns false (and ignores the
    /// drag) while loading or when the id is unknown.
    pub fn begin_drag(&mut self, application_id: &str) -> bool {
        if self.loading || !self.applications.iter().any(|app| app.id == application_id) {
            return false;
        }
        self.dragging = Some(application_id.to_string());
        true
    }

    /// Returns the id of the application being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Abandons the current drag without a move.
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
    }

    /// Stage names the dragged application cannot legally enter, computed
    /// live against every stage so drop-zones can render as disabled.
    /// Empty when nothing is being dragged.
    #[must_use]
    pub fn disabled_stages(&self) -> HashSet<String> {
        let Some(app) = self
            .dragging
            .as_ref()
            .and_then(|id| self.applications.iter().find(|app| &app.id == id))
        else {
            return HashSet::new();
        };
        self.stages
            .iter()
            .filter(|stage| {
                !is_valid_transition(&self.stages, &app.current_stage.name, &stage.name)
            })
            .map(|stage| stage.name.clone())
            .collect()
    }

    /// Resolves a drop to a target stage name: a zone names its stage
    /// directly; a card resolves to that card's current stage.
    #[must_use]
    pub fn resolve_drop_spot(&self, spot: &DropSpot) -> Option<String> {
        match spot {
            DropSpot::Zone(stage_name) => self
                .stages
                .iter()
                .find(|stage| &stage.name == stage_name)
                .map(|stage| stage.name.clone()),
            DropSpot::Card(application_id) => self
                .applications
                .iter()
                .find(|app| &app.id == application_id)
                .map(|app| app.current_stage.name.clone()),
        }
    }

    /// Ends the current drag: validates the transition, applies the move
    /// optimistically, and awaits persistence, rolling back on failure.
    ///
    /// Invalid transitions are an expected user action: they log a
    /// warning and return [`MoveOutcome::Rejected`] without touching
    /// state. Storage failures surface in [`MoveOutcome::Failed`] after
    /// the rollback; they are not propagated as `Err`.
    pub async fn end_drag(
        &mut self,
        spot: Option<DropSpot>,
        store: &StageStore,
        persistence: &dyn MovePersistence,
    ) -> MoveOutcome {
        let Some(application_id) = self.dragging.take() else {
            return MoveOutcome::NoTarget;
        };
        let Some(target_name) = spot.and_then(|spot| self.resolve_drop_spot(&spot)) else {
            return MoveOutcome::NoTarget;
        };
        let Some(app_index) = self
            .applications
            .iter()
            .position(|app| app.id == application_id)
        else {
            return MoveOutcome::NoTarget;
        };

        let from_name = self.applications[app_index].current_stage.name.clone();
        if from_name == target_name {
            return MoveOutcome::SameStage;
        }

        if !is_valid_transition(&self.stages, &from_name, &target_name) {
            warn!(
                application_id = %application_id,
                from = %from_name,
                to = %target_name,
                "stage transition rejected"
            );
            self.sink
                .emit(
                    "move.rejected",
                    Some(serde_json::json!({
                        "applicationId": application_id,
                        "from": from_name,
                        "to": target_name,
                    })),
                )
                .await;
            return MoveOutcome::Rejected;
        }

        // The validator resolved both names, so the target record exists.
        let Some(target_stage) = self.stages.iter().find(|stage| stage.name == target_name)
        else {
            return MoveOutcome::Rejected;
        };

        let previous = self.applications[app_index].current_stage.clone();
        self.applications[app_index].current_stage = CurrentStage {
            id: target_stage.id.clone(),
            name: target_stage.name.clone(),
            stage_type: target_stage.stage_type,
        };
        let command_index = self.commands.len();
        self.commands.push(MoveCommand {
            id: generate_id(),
            application_id: application_id.clone(),
            from_stage: from_name.clone(),
            to_stage: target_name.clone(),
            status: MoveStatus::Pending,
            issued_at: now_utc(),
        });
        self.sink
            .emit(
                "move.validated",
                Some(serde_json::json!({
                    "applicationId": application_id,
                    "from": from_name,
                    "to": target_name,
                })),
            )
            .await;

        // The stage *name* was validated; storage wants the id. Resolving
        // through the store is a hard stop on zero or ambiguous matches.
        let persisted = match store.stage_by_name(&target_name).await {
            Ok(stage) => persistence.persist_move(&application_id, &stage.id).await,
            Err(err) => Err(err),
        };

        match persisted {
            Ok(()) => {
                self.commands[command_index].status = MoveStatus::Confirmed;
                self.sink
                    .emit(
                        "move.persisted",
                        Some(serde_json::json!({
                            "applicationId": application_id,
                            "to": target_name,
                        })),
                    )
                    .await;
                MoveOutcome::Moved
            }
            Err(err) => {
                self.applications[app_index].current_stage = previous;
                self.commands[command_index].status = MoveStatus::Failed;
                warn!(
                    application_id = %application_id,
                    to = %target_name,
                    error = %err,
                    "move persistence failed; optimistic change rolled back"
                );
                self.sink
                    .emit(
                        "move.rolled_back",
                        Some(serde_json::json!({
                            "applicationId": application_id,
                            "to": target_name,
                            "error": err.to_string(),
                        })),
                    )
                    .await;
                MoveOutcome::Failed(err)
            }
        }
    }
}
