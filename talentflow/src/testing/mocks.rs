//! Recording and fault-injecting test doubles.

use crate::board::MovePersistence;
use crate::errors::StageError;
use crate::model::{NewStage, Stage, StagePatch};
use crate::store::StageBackend;
use async_trait::async_trait;
use parking_lot::Mutex;

/// A [`MovePersistence`] double that records every call and can be
/// configured to fail.
#[derive(Debug, Default)]
pub struct RecordingPersistence {
    moves: Mutex<Vec<(String, String)>>,
    failure: Mutex<Option<StageError>>,
}

impl RecordingPersistence {
    /// Creates a persistence double that accepts every move.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a persistence double that fails every move with the given
    /// error.
    #[must_use]
    pub fn failing(error: StageError) -> Self {
        Self {
            moves: Mutex::new(Vec::new()),
            failure: Mutex::new(Some(error)),
        }
    }

    /// Returns the recorded `(application_id, stage_id)` pairs.
    #[must_use]
    pub fn moves(&self) -> Vec<(String, String)> {
        self.moves.lock().clone()
    }
}

#[async_trait]
impl MovePersistence for RecordingPersistence {
    async fn persist_move(
        &self,
        application_id: &str,
        stage_id: &str,
    ) -> Result<(), StageError> {
        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }
        self.moves
            .lock()
            .push((application_id.to_string(), stage_id.to_string()));
        Ok(())
    }
}

/// A backend double whose every operation fails, for exercising storage
/// error propagation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBackend;

#[async_trait]
impl StageBackend for FailingBackend {
    async fn list_stages(&self, _company_id: &str) -> Result<Vec<Stage>, StageError> {
        Err(StageError::Fetch("backend unavailable".into()))
    }

    async fn insert_stage(&self, _stage: NewStage) -> Result<Stage, StageError> {
        Err(StageError::Create("backend unavailable".into()))
    }

    async fn update_stage(
        &self,
        _company_id: &str,
        stage_id: &str,
        _patch: StagePatch,
    ) -> Result<(), StageError> {
        Err(StageError::update(stage_id, "backend unavailable"))
    }

    async fn delete_stage(&self, _company_id: &str, stage_id: &str) -> Result<(), StageError> {
        Err(StageError::delete(stage_id, "backend unavailable"))
    }
}
