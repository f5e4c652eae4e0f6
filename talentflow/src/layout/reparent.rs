//! Re-parenting drags with cycle prevention.
//!
//! The plan is computed against the pre-move tree snapshot; the update
//! call is only issued for `Apply` outcomes. Rejections are silent no-ops,
//! mirroring how invalid board transitions are treated: an expected user
//! action, not an error.

use crate::errors::StageError;
use crate::layout::StageTree;
use crate::model::{StageId, StagePatch};
use crate::store::StageStore;
use tracing::debug;

/// Where a dragged tree node was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The root drop target: detach the node from its parent.
    Root,
    /// Another stage node.
    Node(StageId),
}

/// The outcome of planning a re-parent drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReparentPlan {
    /// Issue an update setting the node's parent.
    Apply {
        /// The dragged node.
        node_id: StageId,
        /// The new parent; `None` detaches to root.
        new_parent: Option<StageId>,
    },
    /// The drop changes nothing (same parent); skip the update call.
    Noop,
    /// The drop would create a cycle, targets the node itself, or refers
    /// to an unknown node. The drag has no effect.
    Rejected,
}

/// Plans a "move node onto target" drag against the pre-move snapshot.
///
/// Root targets are always safe. A node target is rejected when it is the
/// dragged node or any of its descendants, i.e. when the dragged node
/// appears in the target's upward parent chain.
#[must_use]
pub fn plan_reparent(tree: &StageTree, node_id: &str, target: &DropTarget) -> ReparentPlan {
    if tree.get(node_id).is_none() {
        return ReparentPlan::Rejected;
    }

    match target {
        DropTarget::Root => {
            if tree.parent_of(node_id).is_none() {
                ReparentPlan::Noop
            } else {
                ReparentPlan::Apply {
                    node_id: node_id.to_string(),
                    new_parent: None,
                }
            }
        }
        DropTarget::Node(target_id) => {
            if tree.get(target_id).is_none() {
                return ReparentPlan::Rejected;
            }
            if tree.is_ancestor_or_self(node_id, target_id) {
                return ReparentPlan::Rejected;
            }
            if tree.parent_of(node_id).map(String::as_str) == Some(target_id.as_str()) {
                return ReparentPlan::Noop;
            }
            ReparentPlan::Apply {
                node_id: node_id.to_string(),
                new_parent: Some(target_id.clone()),
            }
        }
    }
}

/// Plans the drag and, for `Apply` outcomes only, issues the store update.
/// Returns true when an update was issued.
///
/// # Errors
///
/// Propagates [`StageError::Update`] from the store; rejections and no-ops
/// are not errors.
pub async fn apply_reparent(
    store: &StageStore,
    tree: &StageTree,
    node_id: &str,
    target: &DropTarget,
) -> Result<bool, StageError> {
    match plan_reparent(tree, node_id, target) {
        ReparentPlan::Apply { node_id, new_parent } => {
            store
                .update_stage(&node_id, StagePatch::new().with_parent(new_parent))
                .await?;
            Ok(true)
        }
        ReparentPlan::Noop => Ok(false),
        ReparentPlan::Rejected => {
            debug!(node_id, "re-parent drag rejected");
            Ok(false)
        }
    }
}
