//! The company-scoped stage store.

use crate::errors::StageError;
use crate::events::{EventSink, NoOpEventSink};
use crate::model::{CompanyId, NewStage, Stage, StageId, StagePatch, StageType};
use crate::reorder;
use crate::store::StageBackend;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// CRUD over one company's stage records.
///
/// Every successful mutation refetches and republishes the full stage list
/// so dependent views (board, tree editor) stay consistent; there is no
/// incremental patching. Consumers treat the published snapshot as
/// immutable between refetches.
pub struct StageStore {
    backend: Arc<dyn StageBackend>,
    company_id: CompanyId,
    sink: Arc<dyn EventSink>,
    snapshot: RwLock<Arc<Vec<Stage>>>,
}

impl std::fmt::Debug for StageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageStore")
            .field("company_id", &self.company_id)
            .field("stages", &self.snapshot.read().len())
            .finish()
    }
}

impl StageStore {
    /// Creates a store scoped to one company.
    #[must_use]
    pub fn new(backend: Arc<dyn StageBackend>, company_id: impl Into<CompanyId>) -> Self {
        Self {
            backend,
            company_id: company_id.into(),
            sink: Arc::new(NoOpEventSink),
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Sets the event sink receiving stage lifecycle events.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the company this store is scoped to.
    #[must_use]
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// Returns the last published stage snapshot without touching storage.
    #[must_use]
    pub fn stages(&self) -> Arc<Vec<Stage>> {
        Arc::clone(&self.snapshot.read())
    }

    /// Returns the order index for a stage appended at the end of the
    /// current snapshot.
    #[must_use]
    pub fn next_order_index(&self) -> i64 {
        self.snapshot.read().len() as i64 + 1
    }

    /// Fetches the company's active stages, ordered by `order_index`
    /// ascending, publishes the result, and returns it. An empty list is
    /// not an error.
    pub async fn fetch_stages(&self) -> Result<Arc<Vec<Stage>>, StageError> {
        let mut stages = self.backend.list_stages(&self.company_id).await?;
        stages.sort_by_key(|stage| stage.order_index);
        let published = Arc::new(stages);
        *self.snapshot.write() = Arc::clone(&published);
        debug!(company_id = %self.company_id, count = published.len(), "published stage list");
        Ok(published)
    }

    /// Inserts a new stage. The caller supplies `order_index` (see
    /// [`Self::next_order_index`]); storage rejects a taken slot.
    pub async fn create_stage(&self, stage: NewStage) -> Result<(), StageError> {
        if stage.company_id != self.company_id {
            return Err(StageError::Create(format!(
                "stage belongs to company '{}', store is scoped to '{}'",
                stage.company_id, self.company_id
            )));
        }
        let created = self.backend.insert_stage(stage).await?;
        self.sink
            .emit(
                "stage.created",
                Some(serde_json::json!({ "id": created.id, "name": created.name })),
            )
            .await;
        self.fetch_stages().await?;
        Ok(())
    }

    /// Applies a partial update. Setting `parent_id` here performs no cycle
    /// check; the tree editor runs [`crate::layout::plan_reparent`] first.
    pub async fn update_stage(&self, stage_id: &str, patch: StagePatch) -> Result<(), StageError> {
        self.backend
            .update_stage(&self.company_id, stage_id, patch)
            .await?;
        self.sink
            .emit("stage.updated", Some(serde_json::json!({ "id": stage_id })))
            .await;
        self.fetch_stages().await?;
        Ok(())
    }

    /// Hard-deletes a stage. Pre-check `can_be_deleted`; the store does not
    /// re-validate.
    pub async fn delete_stage(&self, stage_id: &str) -> Result<(), StageError> {
        self.backend
            .delete_stage(&self.company_id, stage_id)
            .await?;
        self.sink
            .emit("stage.deleted", Some(serde_json::json!({ "id": stage_id })))
            .await;
        self.fetch_stages().await?;
        Ok(())
    }

    /// Re-sequences the given stages into 1-based positions matching the
    /// list order, then republishes. See [`crate::reorder`] for the
    /// two-phase collision-avoidance scheme.
    pub async fn reorder_stages(&self, ids: &[StageId]) -> Result<(), StageError> {
        reorder::reorder_stages(self.backend.as_ref(), &self.company_id, ids).await?;
        self.sink
            .emit(
                "stages.reordered",
                Some(serde_json::json!({ "count": ids.len() })),
            )
            .await;
        self.fetch_stages().await?;
        Ok(())
    }

    /// Resolves the stage new applications land in automatically: the one
    /// active, default stage of type `application`.
    ///
    /// # Errors
    ///
    /// [`StageError::LookupMiss`] when no such stage exists and
    /// [`StageError::LookupAmbiguity`] when more than one does; both are
    /// hard stops for the application-creation flow.
    pub async fn default_stage(&self) -> Result<Stage, StageError> {
        let stages = self.fetch_stages().await?;
        let mut matches = stages
            .iter()
            .filter(|stage| stage.is_default && stage.stage_type == StageType::Application);
        match (matches.next(), matches.next()) {
            (Some(stage), None) => Ok(stage.clone()),
            (None, _) => Err(StageError::LookupMiss(format!(
                "company '{}' has no default application stage",
                self.company_id
            ))),
            (Some(_), Some(_)) => Err(StageError::LookupAmbiguity(format!(
                "company '{}' has multiple default application stages",
                self.company_id
            ))),
        }
    }

    /// Resolves an active stage by display name, the translation used when
    /// persisting a validated drag-and-drop move back to storage.
    ///
    /// # Errors
    ///
    /// [`StageError::LookupMiss`] for zero matches,
    /// [`StageError::LookupAmbiguity`] when two active stages share the
    /// name; both abort the move persistence.
    pub async fn stage_by_name(&self, name: &str) -> Result<Stage, StageError> {
        let stages = self.fetch_stages().await?;
        let mut matches = stages.iter().filter(|stage| stage.name == name);
        match (matches.next(), matches.next()) {
            (Some(stage), None) => Ok(stage.clone()),
            (None, _) => Err(StageError::LookupMiss(format!(
                "no active stage named '{name}' in company '{}'",
                self.company_id
            ))),
            (Some(_), Some(_)) => Err(StageError::LookupAmbiguity(format!(
                "multiple active stages named '{name}' in company '{}'",
                self.company_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CollectingEventSink;
    use crate::store::MemoryBackend;
    use pretty_assertions::assert_eq;

    fn store_with_backend() -> (StageStore, Arc<MemoryBackend>, Arc<CollectingEventSink>) {
        let backend = Arc::new(MemoryBackend::new());
        let sink = Arc::new(CollectingEventSink::new());
        let store = StageStore::new(Arc::clone(&backend) as Arc<dyn StageBackend>, "co-1")
            .with_event_sink(Arc::clone(&sink) as Arc<dyn EventSink>);
        (store, backend, sink)
    }

    #[tokio::test]
    async fn test_create_republishes_snapshot() {
        let (store, _backend, sink) = store_with_backend();
        assert!(store.stages().is_empty());

        store
            .create_stage(NewStage::new("co-1", "Applied").with_order_index(1))
            .await
            .unwrap();

        assert_eq!(store.stages().len(), 1);
        assert_eq!(store.next_order_index(), 2);
        assert_eq!(sink.event_types(), vec!["stage.created"]);
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_company() {
        let (store, _backend, _sink) = store_with_backend();
        let err = store
            .create_stage(NewStage::new("co-2", "Applied").with_order_index(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StageError::Create(_)));
    }

    #[tokio::test]
    async fn test_update_and_delete_republish() {
        let (store, backend, _sink) = store_with_backend();
        store
            .create_stage(NewStage::new("co-1", "Applied").with_order_index(1))
            .await
            .unwrap();
        let id = store.stages()[0].id.clone();

        store
            .update_stage(&id, StagePatch::new().with_name("Inbound"))
            .await
            .unwrap();
        assert_eq!(store.stages()[0].name, "Inbound");

        store.delete_stage(&id).await.unwrap();
        assert!(store.stages().is_empty());
        assert!(backend.all_rows().is_empty());
    }

    #[tokio::test]
    async fn test_soft_deleted_stage_excluded_from_fetch() {
        let (store, _backend, _sink) = store_with_backend();
        store
            .create_stage(NewStage::new("co-1", "Applied").with_order_index(1))
            .await
            .unwrap();
        let id = store.stages()[0].id.clone();

        store
            .update_stage(&id, StagePatch::new().with_active(false))
            .await
            .unwrap();
        assert!(store.stages().is_empty());
    }

    #[tokio::test]
    async fn test_default_stage_requires_exactly_one() {
        let (store, _backend, _sink) = store_with_backend();
        let err = store.default_stage().await.unwrap_err();
        assert!(matches!(err, StageError::LookupMiss(_)));

        store
            .create_stage(
                NewStage::new("co-1", "Applied")
                    .with_order_index(1)
                    .with_stage_type(StageType::Application)
                    .as_default(),
            )
            .await
            .unwrap();
        assert_eq!(store.default_stage().await.unwrap().name, "Applied");

        store
            .create_stage(
                NewStage::new("co-1", "Inbound")
                    .with_order_index(2)
                    .with_stage_type(StageType::Application)
                    .as_default(),
            )
            .await
            .unwrap();
        let err = store.default_stage().await.unwrap_err();
        assert!(matches!(err, StageError::LookupAmbiguity(_)));
    }

    #[tokio::test]
    async fn test_stage_by_name_cardinality() {
        let (store, _backend, _sink) = store_with_backend();
        let err = store.stage_by_name("Screen").await.unwrap_err();
        assert!(matches!(err, StageError::LookupMiss(_)));

        store
            .create_stage(NewStage::new("co-1", "Screen").with_order_index(1))
            .await
            .unwrap();
        assert_eq!(store.stage_by_name("Screen").await.unwrap().name, "Screen");

        // Two active stages sharing a name make the lookup ambiguous.
        store
            .create_stage(NewStage::new("co-1", "Screen").with_order_index(2))
            .await
            .unwrap();
        let err = store.stage_by_name("Screen").await.unwrap_err();
        assert!(matches!(err, StageError::LookupAmbiguity(_)));
    }
}
