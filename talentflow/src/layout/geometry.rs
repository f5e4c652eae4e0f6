//! Measure/place layout over a [`StageTree`], plus viewport fitting.
//!
//! A single post-order pass computes subtree widths; a single pre-order
//! pass assigns coordinates. Node footprint and gaps come from
//! [`LayoutConfig`]; the algorithm, not the pixel values, is the contract.

use crate::layout::StageTree;
use crate::model::StageId;
use serde::Serialize;
use std::collections::HashMap;

/// Design constants for the tree editor canvas.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutConfig {
    /// Node footprint width.
    pub node_width: f64,
    /// Node footprint height.
    pub node_height: f64,
    /// Horizontal gap between sibling subtrees.
    pub h_gap: f64,
    /// Vertical gap between depth levels.
    pub v_gap: f64,
    /// Padding applied on every canvas edge.
    pub padding: f64,
    /// Lower zoom clamp for fit-to-viewport.
    pub min_zoom: f64,
    /// Upper zoom clamp for fit-to-viewport.
    pub max_zoom: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 80.0,
            h_gap: 24.0,
            v_gap: 48.0,
            padding: 40.0,
            min_zoom: 0.25,
            max_zoom: 2.0,
        }
    }
}

/// A 2-D point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A laid-out stage node.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedNode {
    /// The stage id.
    pub id: StageId,
    /// Left edge of the node footprint.
    pub x: f64,
    /// Top edge of the node footprint.
    pub y: f64,
    /// Depth in its tree, root = 0.
    pub depth: usize,
    /// The width allocated to this node's whole subtree.
    pub subtree_width: f64,
}

/// A parent-to-child connector path.
#[derive(Debug, Clone, Serialize)]
pub struct Connector {
    /// Parent stage id.
    pub from_id: StageId,
    /// Child stage id.
    pub to_id: StageId,
    /// Bottom-center of the parent footprint.
    pub from: Point,
    /// Top-center of the child footprint.
    pub to: Point,
}

/// The drawable output consumed by the rendering collaborator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeLayout {
    /// Placed nodes in depth-first order.
    pub nodes: Vec<PlacedNode>,
    /// Parent-child connector paths.
    pub connectors: Vec<Connector>,
    /// Canvas width including padding on both sides.
    pub canvas_width: f64,
    /// Canvas height including padding on both sides.
    pub canvas_height: f64,
}

impl TreeLayout {
    /// Returns the placed node for a stage id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PlacedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// The transform that fits a canvas into a viewport.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Viewport {
    /// Scale factor, clamped to the configured zoom range.
    pub zoom: f64,
    /// Horizontal offset centering the scaled canvas.
    pub offset_x: f64,
    /// Vertical offset centering the scaled canvas.
    pub offset_y: f64,
}

/// Lays out the tree: measures subtree widths post-order, places nodes
/// pre-order, and sizes the canvas. Multiple root trees advance a shared
/// horizontal cursor the same way siblings do.
#[must_use]
pub fn layout(tree: &StageTree, config: &LayoutConfig) -> TreeLayout {
    let mut widths: HashMap<StageId, f64> = HashMap::new();
    for root in tree.roots() {
        measure(tree, root, config, &mut widths);
    }

    let mut out = TreeLayout::default();
    let mut cursor = config.padding;
    for root in tree.roots() {
        let width = widths.get(root).copied().unwrap_or(config.node_width);
        place(tree, root, cursor, 0, config, &widths, &mut out);
        cursor += width + config.h_gap;
    }

    let content_right = if tree.roots().is_empty() {
        config.padding
    } else {
        cursor - config.h_gap
    };
    let max_depth = out.nodes.iter().map(|node| node.depth).max();
    out.canvas_width = content_right + config.padding;
    out.canvas_height = match max_depth {
        Some(depth) => {
            2.0f64.mul_add(
                config.padding,
                (depth as f64 + 1.0) * config.node_height + depth as f64 * config.v_gap,
            )
        }
        None => 2.0 * config.padding,
    };
    out
}

/// Post-order measure: a leaf occupies its own footprint; an internal node
/// occupies the sum of its children plus gaps, never narrower than its own
/// footprint.
fn measure(
    tree: &StageTree,
    id: &StageId,
    config: &LayoutConfig,
    widths: &mut HashMap<StageId, f64>,
) -> f64 {
    let children = tree.get(id).map(|node| node.children.clone()).unwrap_or_default();
    let width = if children.is_empty() {
        config.node_width
    } else {
        let sum: f64 = children
            .iter()
            .map(|child| measure(tree, child, config, widths))
            .sum();
        let gaps = (children.len() - 1) as f64 * config.h_gap;
        (sum + gaps).max(config.node_width)
    };
    widths.insert(id.clone(), width);
    width
}

/// Pre-order place: children advance a running left cursor; the parent is
/// centered over the span from its first to last child, clamped to its
/// allocated left edge.
fn place(
    tree: &StageTree,
    id: &StageId,
    left: f64,
    depth: usize,
    config: &LayoutConfig,
    widths: &HashMap<StageId, f64>,
    out: &mut TreeLayout,
) {
    let subtree_width = widths.get(id).copied().unwrap_or(config.node_width);
    let y = config.padding + depth as f64 * (config.node_height + config.v_gap);
    let children = tree.get(id).map(|node| node.children.clone()).unwrap_or_default();

    let x = if children.is_empty() {
        left + (subtree_width - config.node_width) / 2.0
    } else {
        let parent_slot = out.nodes.len();
        // Reserve the parent's slot so depth-first order holds, then place
        // children to learn the span to center over.
        out.nodes.push(PlacedNode {
            id: id.clone(),
            x: left,
            y,
            depth,
            subtree_width,
        });

        let mut running_left = left;
        let mut first_child_x = None;
        let mut last_child_x = left;
        for child in &children {
            let child_width = widths.get(child).copied().unwrap_or(config.node_width);
            place(tree, child, running_left, depth + 1, config, widths, out);
            if let Some(placed) = out.node(child) {
                first_child_x.get_or_insert(placed.x);
                last_child_x = placed.x;
            }
            running_left += child_width + config.h_gap;
        }

        let centered = (first_child_x.unwrap_or(left) + last_child_x) / 2.0;
        let x = centered.max(left);
        out.nodes[parent_slot].x = x;

        for child in &children {
            let Some((child_x, child_y)) = out.node(child).map(|placed| (placed.x, placed.y))
            else {
                continue;
            };
            out.connectors.push(Connector {
                from_id: id.clone(),
                to_id: child.clone(),
                from: Point {
                    x: x + config.node_width / 2.0,
                    y: y + config.node_height,
                },
                to: Point {
                    x: child_x + config.node_width / 2.0,
                    y: child_y,
                },
            });
        }
        return;
    };

    out.nodes.push(PlacedNode {
        id: id.clone(),
        x,
        y,
        depth,
        subtree_width,
    });
}

/// Computes the zoom and centering offsets that fit the canvas into a
/// viewport. The scale is clamped to the configured zoom range, so a small
/// tree is not blown up past `max_zoom` and a huge one not shrunk below
/// `min_zoom`.
#[must_use]
pub fn fit_to_viewport(
    layout: &TreeLayout,
    viewport_width: f64,
    viewport_height: f64,
    config: &LayoutConfig,
) -> Viewport {
    let scale_x = viewport_width / layout.canvas_width.max(1.0);
    let scale_y = viewport_height / layout.canvas_height.max(1.0);
    let zoom = scale_x.min(scale_y).clamp(config.min_zoom, config.max_zoom);
    Viewport {
        zoom,
        offset_x: (viewport_width - layout.canvas_width * zoom) / 2.0,
        offset_y: (viewport_height - layout.canvas_height * zoom) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewStage, Stage};
    use crate::utils::now_utc;
    use pretty_assertions::assert_eq;

    fn stage(id: &str, name: &str, parent: Option<&str>, order_index: i64) -> Stage {
        let mut new = NewStage::new("co-1", name).with_order_index(order_index);
        if let Some(parent) = parent {
            new = new.with_parent(parent);
        }
        new.into_stage(id, now_utc())
    }

    fn cfg() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_three_sibling_roots_canvas_width() {
        // W = 200, H_GAP = 24: content = 3*200 + 2*24 = 648, plus padding
        // on both sides.
        let stages = vec![
            stage("x", "X", None, 1),
            stage("y", "Y", None, 2),
            stage("z", "Z", None, 3),
        ];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);
        assert_eq!(result.canvas_width, 648.0 + 2.0 * config.padding);
        assert_eq!(result.node("x").unwrap().x, config.padding);
        assert_eq!(result.node("y").unwrap().x, config.padding + 224.0);
        assert_eq!(result.node("z").unwrap().x, config.padding + 448.0);
        assert!(result.connectors.is_empty());
    }

    #[test]
    fn test_subtree_width_floor_and_sum() {
        let stages = vec![
            stage("a", "Applied", None, 1),
            stage("b", "Screen", Some("a"), 2),
            stage("c", "Tech Interview", Some("a"), 3),
            stage("d", "Offer", Some("b"), 4),
        ];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);

        for node in &result.nodes {
            assert!(node.subtree_width >= config.node_width, "{}", node.id);
        }
        // a spans its two children: 200 + 24 + 200.
        assert_eq!(result.node("a").unwrap().subtree_width, 424.0);
        // b has one child no wider than itself, floored at W.
        assert_eq!(result.node("b").unwrap().subtree_width, 200.0);
    }

    #[test]
    fn test_parent_centered_over_children() {
        let stages = vec![
            stage("a", "Applied", None, 1),
            stage("b", "Screen", Some("a"), 2),
            stage("c", "Tech Interview", Some("a"), 3),
        ];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);

        let a = result.node("a").unwrap();
        let b = result.node("b").unwrap();
        let c = result.node("c").unwrap();
        assert_eq!(b.x, config.padding);
        assert_eq!(c.x, config.padding + 224.0);
        assert_eq!(a.x, (b.x + c.x) / 2.0);
        assert_eq!(a.y, config.padding);
        assert_eq!(b.y, config.padding + config.node_height + config.v_gap);
    }

    #[test]
    fn test_depth_drives_vertical_position() {
        let stages = vec![
            stage("a", "Applied", None, 1),
            stage("b", "Screen", Some("a"), 2),
            stage("d", "Offer", Some("b"), 3),
        ];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);
        let step = config.node_height + config.v_gap;
        assert_eq!(result.node("d").unwrap().depth, 2);
        assert_eq!(result.node("d").unwrap().y, config.padding + 2.0 * step);
        assert_eq!(
            result.canvas_height,
            2.0 * config.padding + 3.0 * config.node_height + 2.0 * config.v_gap
        );
    }

    #[test]
    fn test_connectors_join_footprint_centers() {
        let stages = vec![
            stage("a", "Applied", None, 1),
            stage("b", "Screen", Some("a"), 2),
        ];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);

        assert_eq!(result.connectors.len(), 1);
        let edge = &result.connectors[0];
        let a = result.node("a").unwrap();
        let b = result.node("b").unwrap();
        assert_eq!(edge.from.x, a.x + config.node_width / 2.0);
        assert_eq!(edge.from.y, a.y + config.node_height);
        assert_eq!(edge.to.x, b.x + config.node_width / 2.0);
        assert_eq!(edge.to.y, b.y);
    }

    #[test]
    fn test_empty_tree_is_padding_only() {
        let config = cfg();
        let result = layout(&StageTree::build(&[]), &config);
        assert!(result.nodes.is_empty());
        assert_eq!(result.canvas_width, 2.0 * config.padding);
        assert_eq!(result.canvas_height, 2.0 * config.padding);
    }

    #[test]
    fn test_fit_to_viewport_clamps_and_centers() {
        let stages = vec![stage("a", "Applied", None, 1)];
        let config = cfg();
        let result = layout(&StageTree::build(&stages), &config);

        // Tiny canvas in a huge viewport: zoom clamps at max.
        let fit = fit_to_viewport(&result, 4000.0, 4000.0, &config);
        assert_eq!(fit.zoom, config.max_zoom);
        assert_eq!(
            fit.offset_x,
            (4000.0 - result.canvas_width * config.max_zoom) / 2.0
        );

        // Canvas larger than the viewport: zoom shrinks but not below min.
        let fit = fit_to_viewport(&result, 10.0, 10.0, &config);
        assert_eq!(fit.zoom, config.min_zoom);
    }
}
