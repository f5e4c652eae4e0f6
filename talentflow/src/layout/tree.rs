//! Deterministic tree construction from the flat stage list.

use crate::model::{Stage, StageId};
use std::collections::{HashMap, HashSet};

/// A stage wrapped with its resolved tree links.
#[derive(Debug, Clone)]
pub struct StageNode {
    /// The underlying stage record.
    pub stage: Stage,
    /// Resolved parent. `None` when the stage is a root, including when
    /// its `parent_id` dangles or points at itself.
    pub parent: Option<StageId>,
    /// Children in `order_index` order.
    pub children: Vec<StageId>,
}

/// A parent-linked stage set resolved into trees.
///
/// Construction rules: a stage whose `parent_id` is unset, self-referring,
/// or absent from the set becomes a root. Children and roots are sorted by
/// `order_index` ascending, so depth-first traversal is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StageTree {
    nodes: HashMap<StageId, StageNode>,
    roots: Vec<StageId>,
}

impl StageTree {
    /// Builds the tree from a flat stage list.
    #[must_use]
    pub fn build(stages: &[Stage]) -> Self {
        let mut nodes: HashMap<StageId, StageNode> = stages
            .iter()
            .map(|stage| {
                (
                    stage.id.clone(),
                    StageNode {
                        stage: stage.clone(),
                        parent: None,
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        let order: HashMap<StageId, i64> = stages
            .iter()
            .map(|stage| (stage.id.clone(), stage.order_index))
            .collect();

        let mut roots = Vec::new();
        for stage in stages {
            let parent = stage
                .parent_id
                .as_ref()
                .filter(|parent_id| *parent_id != &stage.id && nodes.contains_key(*parent_id))
                .cloned();
            match parent {
                Some(parent_id) => {
                    if let Some(parent_node) = nodes.get_mut(&parent_id) {
                        parent_node.children.push(stage.id.clone());
                    }
                    if let Some(node) = nodes.get_mut(&stage.id) {
                        node.parent = Some(parent_id);
                    }
                }
                None => roots.push(stage.id.clone()),
            }
        }

        let by_order = |id: &StageId| order.get(id).copied().unwrap_or(i64::MAX);
        roots.sort_by_key(by_order);
        for node in nodes.values_mut() {
            node.children.sort_by_key(by_order);
        }

        Self { nodes, roots }
    }

    /// Returns the node for a stage id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StageNode> {
        self.nodes.get(id)
    }

    /// Returns the root stage ids in `order_index` order.
    #[must_use]
    pub fn roots(&self) -> &[StageId] {
        &self.roots
    }

    /// Returns the resolved parent of a stage.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<&StageId> {
        self.nodes.get(id).and_then(|node| node.parent.as_ref())
    }

    /// Returns true if `ancestor` is `id` itself or appears anywhere in
    /// `id`'s upward parent chain. Walks the pre-built snapshot only; a
    /// visited set guards against corrupt cyclic input.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: &str, id: &str) -> bool {
        if ancestor == id {
            return true;
        }
        let mut visited = HashSet::new();
        let mut current = self.parent_of(id);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            if !visited.insert(parent_id.clone()) {
                break;
            }
            current = self.parent_of(parent_id);
        }
        false
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
