//! Transition rules: whether an application may move between two stages.
//!
//! The decision is pure given the stage list and two stage names. Names,
//! not ids, are the correlation key, the same fragility the board's
//! grouping carries; see the store's `stage_by_name` for where ids are
//! recovered at the persistence edge.

use crate::model::Stage;

/// Returns true if any stage in the set has a parent, i.e. the company
/// uses a hierarchical pipeline rather than a flat funnel.
#[must_use]
pub fn has_hierarchy(stages: &[Stage]) -> bool {
    stages.iter().any(|stage| stage.parent_id.is_some())
}

/// Decides whether moving an application from `from_name` to `to_name` is
/// legal. Pure; no side effects.
///
/// Rules, in order:
/// 1. Same name: allowed (no-op move).
/// 2. Either name absent from the stage list: not allowed.
/// 3. Flat funnel (no stage has a parent): allowed iff the target's
///    `order_index` is at or past the source's. Backward moves are
///    disallowed; the funnel is one-directional.
/// 4. Hierarchical: allowed iff the target is a direct child of the
///    source. One step down only: no siblings, grandchildren, or upward
///    moves.
#[must_use]
pub fn is_valid_transition(stages: &[Stage], from_name: &str, to_name: &str) -> bool {
    if from_name == to_name {
        return true;
    }

    let Some(from) = stages.iter().find(|stage| stage.name == from_name) else {
        return false;
    };
    let Some(to) = stages.iter().find(|stage| stage.name == to_name) else {
        return false;
    };

    if has_hierarchy(stages) {
        to.parent_id.as_deref() == Some(from.id.as_str())
    } else {
        to.order_index >= from.order_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewStage;
    use crate::utils::now_utc;

    fn flat_stage(id: &str, name: &str, order_index: i64) -> Stage {
        NewStage::new("co-1", name)
            .with_order_index(order_index)
            .into_stage(id, now_utc())
    }

    fn child_stage(id: &str, name: &str, parent: &str, order_index: i64) -> Stage {
        NewStage::new("co-1", name)
            .with_parent(parent)
            .with_order_index(order_index)
            .into_stage(id, now_utc())
    }

    fn flat_funnel() -> Vec<Stage> {
        vec![
            flat_stage("a", "Applied", 1),
            flat_stage("b", "Screen", 2),
            flat_stage("c", "Offer", 3),
        ]
    }

    fn hierarchical_set() -> Vec<Stage> {
        vec![
            flat_stage("a", "Applied", 1),
            child_stage("b", "Screen", "a", 2),
            child_stage("c", "Tech Interview", "a", 3),
            child_stage("d", "Offer", "b", 4),
        ]
    }

    #[test]
    fn test_no_op_identity() {
        let stages = flat_funnel();
        for stage in &stages {
            assert!(is_valid_transition(&stages, &stage.name, &stage.name));
        }
        // The fast path does not consult the list at all.
        assert!(is_valid_transition(&stages, "Nowhere", "Nowhere"));
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        let stages = flat_funnel();
        assert!(!is_valid_transition(&stages, "Applied", "Nowhere"));
        assert!(!is_valid_transition(&stages, "Nowhere", "Applied"));
    }

    #[test]
    fn test_flat_funnel_is_forward_only() {
        let stages = flat_funnel();
        assert!(is_valid_transition(&stages, "Applied", "Offer"));
        assert!(is_valid_transition(&stages, "Applied", "Screen"));
        assert!(!is_valid_transition(&stages, "Offer", "Applied"));
        assert!(!is_valid_transition(&stages, "Screen", "Applied"));
    }

    #[test]
    fn test_sequential_monotonicity_matches_order_index() {
        let stages = flat_funnel();
        for from in &stages {
            for to in &stages {
                let expected = to.order_index >= from.order_index;
                assert_eq!(
                    is_valid_transition(&stages, &from.name, &to.name),
                    expected,
                    "{} -> {}",
                    from.name,
                    to.name
                );
            }
        }
    }

    #[test]
    fn test_hierarchy_allows_only_direct_children() {
        let stages = hierarchical_set();
        assert!(is_valid_transition(&stages, "Applied", "Screen"));
        assert!(is_valid_transition(&stages, "Applied", "Tech Interview"));
        assert!(is_valid_transition(&stages, "Screen", "Offer"));

        // Not a direct child: grandchild, sibling, upward.
        assert!(!is_valid_transition(&stages, "Applied", "Offer"));
        assert!(!is_valid_transition(&stages, "Screen", "Tech Interview"));
        assert!(!is_valid_transition(&stages, "Screen", "Applied"));
        assert!(!is_valid_transition(&stages, "Offer", "Screen"));
    }

    #[test]
    fn test_single_parent_link_switches_mode() {
        // One parent link anywhere puts the whole set in hierarchical mode,
        // so the order-index rule stops applying.
        let stages = vec![
            flat_stage("a", "Applied", 1),
            flat_stage("b", "Screen", 2),
            child_stage("c", "Offer", "b", 3),
        ];
        assert!(has_hierarchy(&stages));
        assert!(!is_valid_transition(&stages, "Applied", "Screen"));
        assert!(is_valid_transition(&stages, "Screen", "Offer"));
    }

    #[test]
    fn test_flat_set_has_no_hierarchy() {
        assert!(!has_hierarchy(&flat_funnel()));
        assert!(has_hierarchy(&hierarchical_set()));
    }
}
