//! Pipeline board: applications grouped by stage, drag-and-drop moves
//! gated by the transition rules, optimistic local state with rollback.

mod drag;
mod grouping;

#[cfg(test)]
mod integration_tests;

pub use drag::{
    DropSpot, MoveCommand, MoveOutcome, MovePersistence, MoveStatus, PipelineBoard,
};
pub use grouping::{group_by_stage, skeleton_counts, StageGroup};
