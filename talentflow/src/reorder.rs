//! Two-phase stage reordering.
//!
//! Storage enforces uniqueness on `(company, order_index)`, so writing the
//! final positions directly would collide mid-sequence. The engine instead
//! displaces every stage into a high, guaranteed-free range first, then
//! settles each into its 1-based position. Updates are awaited one at a
//! time so the write order stays deterministic and a mid-sequence failure
//! has a bounded blast radius.
//!
//! If the settle phase is interrupted, indices are left in the displaced
//! range: still unique, and a retry of the same call completes the
//! sequence. No multi-row transaction is assumed.

use crate::errors::StageError;
use crate::model::{StageId, StagePatch};
use crate::store::StageBackend;
use tracing::debug;

/// Offset added to displaced indices. Exceeds any plausible real index, so
/// phase-1 values can never collide with committed positions.
pub const DISPLACE_OFFSET: i64 = 1000;

/// Rewrites each listed stage's `order_index` to its 1-based position in
/// `ids`. Every write is scoped by both stage id and company id.
///
/// # Errors
///
/// Any failed write aborts with [`StageError::Reorder`]. Stages already
/// written stay written; callers tolerate partial application and retry.
pub async fn reorder_stages(
    backend: &dyn StageBackend,
    company_id: &str,
    ids: &[StageId],
) -> Result<(), StageError> {
    debug!(company_id, count = ids.len(), "reorder: displace phase");
    for (position, id) in ids.iter().enumerate() {
        let displaced = DISPLACE_OFFSET + position as i64 + 1;
        backend
            .update_stage(company_id, id, StagePatch::new().with_order_index(displaced))
            .await
            .map_err(|err| {
                StageError::Reorder(format!("displace failed for stage '{id}': {err}"))
            })?;
    }

    debug!(company_id, count = ids.len(), "reorder: settle phase");
    for (position, id) in ids.iter().enumerate() {
        let settled = position as i64 + 1;
        backend
            .update_stage(company_id, id, StagePatch::new().with_order_index(settled))
            .await
            .map_err(|err| {
                StageError::Reorder(format!("settle failed for stage '{id}': {err}"))
            })?;
    }

    Ok(())
}
