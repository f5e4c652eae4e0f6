//! The persistence collaborator interface.

use crate::errors::StageError;
use crate::model::{NewStage, Stage, StagePatch};
use async_trait::async_trait;
use std::fmt::Debug;

/// Interface to whatever hosts the stage table.
///
/// Every operation is scoped by company id; a backend must never let one
/// tenant's write touch another tenant's rows. Listing returns only active
/// stages, ordered by `order_index` ascending, and an empty list when the
/// company has no stages (not an error).
#[async_trait]
pub trait StageBackend: Send + Sync + Debug {
    /// Lists the company's active stages in `order_index` order.
    async fn list_stages(&self, company_id: &str) -> Result<Vec<Stage>, StageError>;

    /// Inserts a new stage. The backend rejects a duplicate
    /// `(company, order_index)` pair with [`StageError::Create`].
    async fn insert_stage(&self, stage: NewStage) -> Result<Stage, StageError>;

    /// Applies a partial update to one stage, scoped by both id and
    /// company. Only the provided fields change. No cycle check is
    /// performed on `parent_id` writes.
    async fn update_stage(
        &self,
        company_id: &str,
        stage_id: &str,
        patch: StagePatch,
    ) -> Result<(), StageError>;

    /// Hard-deletes one stage, scoped by both id and company. The caller
    /// is responsible for pre-checking `can_be_deleted`.
    async fn delete_stage(&self, company_id: &str, stage_id: &str) -> Result<(), StageError>;
}
