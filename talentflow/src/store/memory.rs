//! In-memory reference backend.
//!
//! Behaves like the hosted store for the invariants the core relies on:
//! tenant scoping, active-only ordered listing, and a uniqueness constraint
//! on `(company, order_index)`.

use crate::errors::StageError;
use crate::model::{NewStage, Stage, StagePatch};
use crate::store::StageBackend;
use crate::utils::{generate_id, now_utc};
use async_trait::async_trait;
use parking_lot::RwLock;

/// An in-memory stage table, used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rows: RwLock<Vec<Stage>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with the given rows.
    #[must_use]
    pub fn with_rows(rows: Vec<Stage>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Returns a copy of every row, active or not, in insertion order.
    #[must_use]
    pub fn all_rows(&self) -> Vec<Stage> {
        self.rows.read().clone()
    }

    fn order_index_taken(rows: &[Stage], company_id: &str, order_index: i64, skip_id: Option<&str>) -> bool {
        rows.iter().any(|row| {
            row.company_id == company_id
                && row.order_index == order_index
                && skip_id != Some(row.id.as_str())
        })
    }
}

#[async_trait]
impl StageBackend for MemoryBackend {
    async fn list_stages(&self, company_id: &str) -> Result<Vec<Stage>, StageError> {
        let mut stages: Vec<Stage> = self
            .rows
            .read()
            .iter()
            .filter(|row| row.company_id == company_id && row.is_active)
            .cloned()
            .collect();
        stages.sort_by_key(|stage| stage.order_index);
        Ok(stages)
    }

    async fn insert_stage(&self, stage: NewStage) -> Result<Stage, StageError> {
        let mut rows = self.rows.write();
        if Self::order_index_taken(&rows, &stage.company_id, stage.order_index, None) {
            return Err(StageError::Create(format!(
                "order index {} is already taken in company '{}'",
                stage.order_index, stage.company_id
            )));
        }
        let row = stage.into_stage(generate_id(), now_utc());
        rows.push(row.clone());
        Ok(row)
    }

    async fn update_stage(
        &self,
        company_id: &str,
        stage_id: &str,
        patch: StagePatch,
    ) -> Result<(), StageError> {
        let mut rows = self.rows.write();
        if let Some(order_index) = patch.order_index {
            if Self::order_index_taken(&rows, company_id, order_index, Some(stage_id)) {
                return Err(StageError::update(
                    stage_id,
                    format!("order index {order_index} is already taken"),
                ));
            }
        }
        let row = rows
            .iter_mut()
            .find(|row| row.id == stage_id && row.company_id == company_id)
            .ok_or_else(|| StageError::update(stage_id, "row not found"))?;
        patch.apply_to(row, now_utc());
        Ok(())
    }

    async fn delete_stage(&self, company_id: &str, stage_id: &str) -> Result<(), StageError> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|row| !(row.id == stage_id && row.company_id == company_id));
        if rows.len() == before {
            return Err(StageError::delete(stage_id, "row not found"));
        }
        Ok(())
    }
}
