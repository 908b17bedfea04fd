// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_layout --heading-base-level=0

//! Arbor Layout: deterministic two-pass tree layout.
//!
//! Given a document and a measurer, this crate assigns every visible node
//! an absolute frame. The algorithm is two tree walks:
//!
//! 1. **Subtree sizing** (post-order): a leaf or collapsed node occupies
//!    exactly its measured box. An internal node's subtree spans, on the
//!    cross axis, the sum of its children's subtree spans plus sibling
//!    spacing (or its own box if that is larger), and on the main axis,
//!    its own box plus level spacing plus the deepest child subtree.
//! 2. **Position assignment** (pre-order): every node is centered on the
//!    cross axis within its subtree slot; its children block is centered
//!    against the node's slot and laid out consecutively one level
//!    further along the main axis.
//!
//! [`Direction::Horizontal`] grows rightward with siblings stacking down;
//! [`Direction::Vertical`] is the transposed analogue. [`Direction::Free`]
//! means manual positioning: the pass returns without touching anything.
//!
//! Collapsed nodes are sized and placed as leaves. Their hidden
//! descendants get their frames *cleared* rather than left stale, so a
//! renderer can never draw coordinates from a previous pass.
//!
//! Layout is deterministic: the same tree, content, and styles produce
//! bit-identical frames. Nothing depends on previous positions and
//! nothing is randomized.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use arbor_document::{Direction, Document, NodeId, NodeKind};
use arbor_measure::{NodeMeasurer, SizeBounds, SizingProfile};
use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

/// Spacing and sizing parameters for a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Gap between adjacent sibling subtrees, along the cross axis.
    pub sibling_spacing: f64,
    /// Gap between a node and its children block, along the main axis.
    pub level_spacing: f64,
    /// Where the root's subtree slot starts.
    pub origin: Point,
    /// Per-class node size bounds.
    pub sizing: SizingProfile,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sibling_spacing: 24.0,
            level_spacing: 48.0,
            origin: Point::ZERO,
            sizing: SizingProfile::default(),
        }
    }
}

/// Lays out `doc`, assigning every visible node's frame in place.
///
/// A no-op when the document's direction is [`Direction::Free`]. Hidden
/// descendants of collapsed nodes have their frames cleared.
pub fn layout(doc: &mut Document, measurer: &mut NodeMeasurer<NodeId>, config: &LayoutConfig) {
    let axis = match doc.direction() {
        Direction::Free => return,
        Direction::Horizontal => Axis::Horizontal,
        Direction::Vertical => Axis::Vertical,
    };

    #[cfg(feature = "tracing")]
    tracing::trace!(
        nodes = doc.node_count(),
        direction = ?doc.direction(),
        "layout pass"
    );

    let root = doc.root();
    let mut extents = HashMap::new();
    size_subtree(doc, measurer, config, axis, root, &mut extents);
    let (main, cross) = axis.split_point(config.origin);
    place_subtree(doc, config, axis, root, main, cross, &extents);
}

/// Which document axis is the "main" (depth) axis.
#[derive(Copy, Clone, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Splits a measured box into (main extent, cross extent).
    fn split(self, size: Size) -> (f64, f64) {
        match self {
            Self::Horizontal => (size.width, size.height),
            Self::Vertical => (size.height, size.width),
        }
    }

    fn split_point(self, point: Point) -> (f64, f64) {
        match self {
            Self::Horizontal => (point.x, point.y),
            Self::Vertical => (point.y, point.x),
        }
    }

    /// Rejoins (main extent, cross extent) into a box.
    fn join(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a world frame from (main, cross) coordinates and a box.
    fn rect(self, main: f64, cross: f64, size: Size) -> Rect {
        match self {
            Self::Horizontal => Rect::new(main, cross, main + size.width, cross + size.height),
            Self::Vertical => Rect::new(cross, main, cross + size.width, main + size.height),
        }
    }
}

/// Aggregated extents of one node's visible subtree, in (main, cross)
/// coordinates.
#[derive(Copy, Clone, Debug, Default)]
struct SubtreeExtent {
    own_main: f64,
    own_cross: f64,
    main: f64,
    cross: f64,
}

fn bounds_for(sizing: &SizingProfile, kind: NodeKind) -> SizeBounds {
    match kind {
        NodeKind::Root => sizing.root,
        NodeKind::Branch => sizing.branch,
        NodeKind::Leaf => sizing.leaf,
    }
}

fn size_subtree(
    doc: &Document,
    measurer: &mut NodeMeasurer<NodeId>,
    config: &LayoutConfig,
    axis: Axis,
    id: NodeId,
    extents: &mut HashMap<NodeId, SubtreeExtent>,
) -> (f64, f64) {
    let Some(kind) = doc.kind(id) else {
        return (0.0, 0.0);
    };
    let font_size = doc.style(id).map(|s| s.font_size).unwrap_or(0.0);
    let content = doc.content(id).unwrap_or("");
    let own = measurer.size_of(id, content, font_size, bounds_for(&config.sizing, kind));
    let (own_main, own_cross) = axis.split(own);

    let children = doc.children_of(id);
    let visible = !doc.is_collapsed(id) && !children.is_empty();

    let (main, cross) = if visible {
        let mut deepest = 0.0_f64;
        let mut stacked = 0.0_f64;
        for &child in children {
            let (child_main, child_cross) =
                size_subtree(doc, measurer, config, axis, child, extents);
            deepest = deepest.max(child_main);
            stacked += child_cross;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Child counts are far below 2^52."
        )]
        let gaps = (children.len() - 1) as f64 * config.sibling_spacing;
        (
            own_main + config.level_spacing + deepest,
            own_cross.max(stacked + gaps),
        )
    } else {
        (own_main, own_cross)
    };

    extents.insert(
        id,
        SubtreeExtent {
            own_main,
            own_cross,
            main,
            cross,
        },
    );
    (main, cross)
}

fn place_subtree(
    doc: &mut Document,
    config: &LayoutConfig,
    axis: Axis,
    id: NodeId,
    slot_main: f64,
    slot_cross: f64,
    extents: &HashMap<NodeId, SubtreeExtent>,
) {
    let Some(ext) = extents.get(&id).copied() else {
        return;
    };

    // The node itself is centered on the cross axis within its slot.
    let node_cross = slot_cross + (ext.cross - ext.own_cross) / 2.0;
    let size = axis.join(ext.own_main, ext.own_cross);
    doc.set_frame(id, Some(axis.rect(slot_main, node_cross, size)));

    let children: SmallVec<[NodeId; 8]> = doc.children_of(id).iter().copied().collect();
    if children.is_empty() {
        return;
    }
    if doc.is_collapsed(id) {
        for &child in &children {
            clear_frames(doc, child);
        }
        return;
    }

    let stacked: f64 = children
        .iter()
        .filter_map(|c| extents.get(c))
        .map(|e| e.cross)
        .sum();
    #[allow(
        clippy::cast_precision_loss,
        reason = "Child counts are far below 2^52."
    )]
    let total = stacked + (children.len() - 1) as f64 * config.sibling_spacing;

    let child_main = slot_main + ext.own_main + config.level_spacing;
    let mut child_cross = slot_cross + (ext.cross - total) / 2.0;
    for &child in &children {
        let Some(child_ext) = extents.get(&child) else {
            continue;
        };
        place_subtree(doc, config, axis, child, child_main, child_cross, extents);
        child_cross += child_ext.cross + config.sibling_spacing;
    }
}

/// Clears the frames of `id` and its whole subtree.
fn clear_frames(doc: &mut Document, id: NodeId) {
    doc.set_frame(id, None);
    let children: SmallVec<[NodeId; 8]> = doc.children_of(id).iter().copied().collect();
    for &child in &children {
        clear_frames(doc, child);
    }
}
