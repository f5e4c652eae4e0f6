//! Tree layout engine for the visual stage editor.
//!
//! Converts the flat, parent-linked stage list into a drawable tree
//! (positions, subtree widths, connector paths, canvas size), computes the
//! fit-to-viewport transform, and mediates re-parenting drags with cycle
//! prevention.

mod geometry;
mod reparent;
mod tree;

pub use geometry::{
    fit_to_viewport, layout, Connector, LayoutConfig, PlacedNode, Point, TreeLayout, Viewport,
};
pub use reparent::{apply_reparent, plan_reparent, DropTarget, ReparentPlan};
pub use tree::{StageNode, StageTree};
