// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document model: node identifiers, kinds, flags,
//! styles, and metadata.

use alloc::string::String;
use alloc::vec::Vec;

/// Identifier for a node in a document (generational).
///
/// A `NodeId` stays unique for the lifetime of a document: when a freed
/// slot is reused, its generation is bumped, so an id held across a
/// deletion can never alias a different live node. Accessors on
/// [`Document`](crate::Document) return `None` (or an empty slice) for
/// stale ids.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Derived role of a node within the tree.
///
/// Kind is never stored. It is computed from parent-presence and child
/// count at the point of the query, so it cannot drift out of sync with
/// the structure under mutation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// The unique node without a parent.
    Root,
    /// A node with at least one child.
    Branch,
    /// A node with no children.
    Leaf,
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node's children are hidden from layout and rendering but
        /// retained in the tree.
        const COLLAPSED = 0b0000_0001;
        /// The node's content was produced by an AI integration rather
        /// than typed by the user.
        const AI_GENERATED = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Automatic layout direction of a document.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Children extend to the right of their parent.
    #[default]
    Horizontal,
    /// Children extend below their parent.
    Vertical,
    /// Manual positioning; the layout engine leaves positions untouched.
    Free,
}

/// Size-affecting text style of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    /// Font size in logical pixels. Drives measurement and wrapping.
    pub font_size: f64,
    /// Font family name. Passed through to the host's renderer.
    pub font_family: String,
    /// Font weight (CSS-style, 100–900).
    pub font_weight: u16,
}

impl NodeStyle {
    /// Default style for the root node: larger and heavier than the rest.
    #[must_use]
    pub fn root() -> Self {
        Self {
            font_size: 18.0,
            font_weight: 600,
            ..Self::default()
        }
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: String::from("sans-serif"),
            font_weight: 400,
        }
    }
}

/// A partial style update; `None` fields are left unchanged.
///
/// Used both for single-node edits and for batch application over a
/// multi-selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StylePatch {
    /// New font size, if any.
    pub font_size: Option<f64>,
    /// New font family, if any.
    pub font_family: Option<String>,
    /// New font weight, if any.
    pub font_weight: Option<u16>,
}

impl StylePatch {
    /// Returns `true` if the patch changes nothing regardless of target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.font_family.is_none() && self.font_weight.is_none()
    }

    /// Applies the patch to `style`, returning whether any field changed.
    pub fn apply(&self, style: &mut NodeStyle) -> bool {
        let mut changed = false;
        if let Some(size) = self.font_size
            && style.font_size != size
        {
            style.font_size = size;
            changed = true;
        }
        if let Some(family) = &self.font_family
            && style.font_family != *family
        {
            style.font_family = family.clone();
            changed = true;
        }
        if let Some(weight) = self.font_weight
            && style.font_weight != weight
        {
            style.font_weight = weight;
            changed = true;
        }
        changed
    }
}

/// Provenance and change tracking for a node.
///
/// Revisions are the document's monotonic mutation counter, not
/// wall-clock time; hosts that need timestamps map revisions to times at
/// the boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMetadata {
    /// Document revision at which the node was created.
    pub created: u64,
    /// Document revision of the node's last change.
    pub modified: u64,
    /// Provider id for AI-generated nodes.
    pub ai_provider: Option<String>,
}

/// Initial data for a node being inserted into a document.
///
/// Callers fill in what they care about and take the rest from
/// `Default`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSeed {
    /// Text content of the node.
    pub content: String,
    /// Text style of the node.
    pub style: NodeStyle,
    /// Initial state flags.
    pub flags: NodeFlags,
    /// Provider id when the node is AI-generated.
    pub ai_provider: Option<String>,
}

impl NodeSeed {
    /// A seed with the given content and everything else defaulted.
    #[must_use]
    pub fn with_content(content: String) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }
}

/// An owned, id-free copy of a node and its descendants.
///
/// This is the clipboard payload: grafting a `Subtree` back into a
/// document allocates fresh ids throughout, so pasting the same subtree
/// twice yields two independent copies.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtree {
    /// Text content of the copied node.
    pub content: String,
    /// Text style of the copied node.
    pub style: NodeStyle,
    /// State flags of the copied node.
    pub flags: NodeFlags,
    /// Provider id when the copied node was AI-generated.
    pub ai_provider: Option<String>,
    /// Copies of the node's children, in order.
    pub children: Vec<Subtree>,
}
