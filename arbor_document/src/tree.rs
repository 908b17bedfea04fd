// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core document implementation: the node arena, structure, queries.

use alloc::string::String;
use alloc::{vec, vec::Vec};
use kurbo::Rect;

use crate::types::{
    Direction, NodeFlags, NodeId, NodeKind, NodeMetadata, NodeSeed, NodeStyle, StylePatch, Subtree,
};

/// A single node's data within the arena.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    content: String,
    style: NodeStyle,
    flags: NodeFlags,
    frame: Option<Rect>,
    metadata: NodeMetadata,
}

impl Node {
    fn new(generation: u32, seed: NodeSeed, revision: u64) -> Self {
        let ai = seed.ai_provider.is_some() || seed.flags.contains(NodeFlags::AI_GENERATED);
        let mut flags = seed.flags;
        flags.set(NodeFlags::AI_GENERATED, ai);
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            content: seed.content,
            style: seed.style,
            flags,
            frame: None,
            metadata: NodeMetadata {
                created: revision,
                modified: revision,
                ai_provider: seed.ai_provider,
            },
        }
    }
}

/// A mind-map document: one rooted tree of nodes plus document-level data.
///
/// The tree is stored as a generational arena, so every lookup by
/// [`NodeId`] is O(1) and stale ids are rejected instead of aliasing a
/// reused slot. An operation referencing a dead id, or one that would
/// detach the root or create a cycle, leaves the document unchanged.
///
/// `Document` is `Clone`; a history snapshot is simply a clone, which
/// deep-copies the arena and shares nothing with the live document.
///
/// ## Example
///
/// ```rust
/// use arbor_document::{Document, NodeKind, NodeSeed};
///
/// let mut doc = Document::new(1, "Topic");
/// let root = doc.root();
/// assert_eq!(doc.kind(root), Some(NodeKind::Root));
///
/// let rev = doc.bump_revision();
/// let child = doc
///     .insert_child(root, NodeSeed::with_content("A".into()), rev)
///     .unwrap();
/// assert_eq!(doc.kind(root), Some(NodeKind::Branch));
/// assert_eq!(doc.kind(child), Some(NodeKind::Leaf));
/// ```
#[derive(Clone, PartialEq)]
pub struct Document {
    id: u64,
    title: String,
    direction: Direction,
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    created: u64,
    revision: u64,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("direction", &self.direction)
            .field("nodes_alive", &self.node_count())
            .field("root", &self.root)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document containing only a root node whose content is the
    /// document title.
    pub fn new(id: u64, title: &str) -> Self {
        let mut doc = Self {
            id,
            title: String::from(title),
            direction: Direction::default(),
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            created: 0,
            revision: 0,
        };
        let seed = NodeSeed {
            content: String::from(title),
            style: NodeStyle::root(),
            ..NodeSeed::default()
        };
        doc.root = doc.alloc(seed, 0);
        doc
    }

    // --- document-level data ---

    /// Host-assigned document identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the title, returning whether it changed.
    pub fn set_title(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        self.title = String::from(title);
        true
    }

    /// Current automatic layout direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sets the layout direction, returning whether it changed.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction == direction {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Revision at which the document was created.
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Monotonic revision of the last mutation.
    ///
    /// Change-detection collaborators (history recording, autosave) key on
    /// this value: every real mutation bumps it exactly once, and no-op
    /// operations leave it alone.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Advances the revision counter by one and returns the new value.
    ///
    /// Called by the mutation engine once per logical operation, after it
    /// has established that the operation really changes something.
    pub fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// The root node id. Always live.
    pub fn root(&self) -> NodeId {
        self.root
    }

    // --- node queries ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation stored in that slot. See [`NodeId`] for the semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Derived kind of a live node: root, branch, or leaf.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        let node = self.node_opt(id)?;
        Some(if node.parent.is_none() {
            NodeKind::Root
        } else if node.children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Branch
        })
    }

    /// Text content of a live node.
    pub fn content(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.content.as_str())
    }

    /// Text style of a live node.
    pub fn style(&self, id: NodeId) -> Option<&NodeStyle> {
        self.node_opt(id).map(|n| &n.style)
    }

    /// State flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Whether a live node is collapsed. Stale ids read as not collapsed.
    pub fn is_collapsed(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .map(|n| n.flags.contains(NodeFlags::COLLAPSED))
            .unwrap_or(false)
    }

    /// Laid-out frame of a live node, if the last layout pass placed it.
    ///
    /// `None` for hidden descendants of a collapsed node: the layout pass
    /// clears their frames so stale coordinates can never be rendered.
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).and_then(|n| n.frame)
    }

    /// Metadata of a live node.
    pub fn metadata(&self, id: NodeId) -> Option<&NodeMetadata> {
        self.node_opt(id).map(|n| &n.metadata)
    }

    /// Returns the parent of a node if live, or `None` for the root or
    /// stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a node, in order; empty for leaves and stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Returns true if `ancestor` is a strict ancestor of `id`.
    ///
    /// This is the shared cycle guard: a reparent onto a descendant is
    /// rejected by exactly this walk.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(id) {
            return false;
        }
        let mut current = self.node(id).parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.node(p).parent;
        }
        false
    }

    /// Iterates all live nodes in document order (pre-order, children in
    /// insertion order).
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root];
        core::iter::from_fn(move || {
            let id = stack.pop()?;
            for &child in self.node(id).children.iter().rev() {
                stack.push(child);
            }
            Some(id)
        })
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Depth of the tree: 1 for a lone root.
    pub fn depth(&self) -> usize {
        self.depth_below(self.root)
    }

    fn depth_below(&self, id: NodeId) -> usize {
        1 + self
            .node(id)
            .children
            .iter()
            .map(|&c| self.depth_below(c))
            .max()
            .unwrap_or(0)
    }

    // --- structural mutation ---

    /// Insert a new node as the last child of `parent`.
    ///
    /// Returns `None` (and changes nothing) if `parent` is stale. The new
    /// node's metadata is stamped with `revision`.
    pub fn insert_child(&mut self, parent: NodeId, seed: NodeSeed, revision: u64) -> Option<NodeId> {
        if !self.is_alive(parent) {
            return None;
        }
        let id = self.alloc(seed, revision);
        self.link_parent(id, parent);
        Some(id)
    }

    /// Remove a node and its entire subtree.
    ///
    /// Returns the removed ids (the target first, descendants in document
    /// order). The root cannot be removed; the call returns an empty list
    /// for the root and for stale ids.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) || id == self.root {
            return Vec::new();
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            for &child in self.node(current).children.iter().rev() {
                stack.push(child);
            }
            self.nodes[current.idx()] = None;
            self.free_list.push(current.idx());
            removed.push(current);
        }
        removed
    }

    /// Reattach `id` as the last child of `new_parent`.
    ///
    /// Reattaching under the current parent moves the node to the end of
    /// the sibling order. No-op (returns `false`) if either id is stale,
    /// `id` is the root or equals `new_parent`, or `new_parent` lies
    /// inside `id`'s subtree (which would create a cycle).
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if !self.is_alive(id)
            || !self.is_alive(new_parent)
            || id == self.root
            || id == new_parent
            || self.is_ancestor(id, new_parent)
        {
            return false;
        }
        if let Some(old_parent) = self.node(id).parent {
            self.unlink_parent(id, old_parent);
        }
        self.link_parent(id, new_parent);
        true
    }

    /// Replaces a live node's content, returning whether it changed.
    pub fn set_content(&mut self, id: NodeId, content: &str) -> bool {
        match self.node_opt_mut(id) {
            Some(n) if n.content != content => {
                n.content = String::from(content);
                true
            }
            _ => false,
        }
    }

    /// Applies a style patch to a live node, returning whether any field
    /// changed.
    pub fn apply_style(&mut self, id: NodeId, patch: &StylePatch) -> bool {
        match self.node_opt_mut(id) {
            Some(n) => patch.apply(&mut n.style),
            None => false,
        }
    }

    /// Flips a live node's collapsed flag, returning the new state.
    pub fn toggle_collapsed(&mut self, id: NodeId) -> Option<bool> {
        let n = self.node_opt_mut(id)?;
        n.flags.toggle(NodeFlags::COLLAPSED);
        Some(n.flags.contains(NodeFlags::COLLAPSED))
    }

    /// Stores the laid-out frame of a node. `None` marks the node as not
    /// placed (hidden). Stale ids are ignored.
    pub fn set_frame(&mut self, id: NodeId, frame: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.frame = frame;
        }
    }

    /// Stamps a live node's modified revision.
    pub fn stamp_modified(&mut self, id: NodeId, revision: u64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.metadata.modified = revision;
        }
    }

    // --- subtree copy ---

    /// Returns an owned, id-free copy of `id` and its descendants, or
    /// `None` for stale ids.
    pub fn extract_subtree(&self, id: NodeId) -> Option<Subtree> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.copy_below(id))
    }

    fn copy_below(&self, id: NodeId) -> Subtree {
        let node = self.node(id);
        Subtree {
            content: node.content.clone(),
            style: node.style.clone(),
            flags: node.flags,
            ai_provider: node.metadata.ai_provider.clone(),
            children: node.children.iter().map(|&c| self.copy_below(c)).collect(),
        }
    }

    /// Grafts a copy of `subtree` under `parent`, allocating fresh ids
    /// throughout. Returns the id of the grafted root, or `None` if
    /// `parent` is stale.
    pub fn graft(&mut self, parent: NodeId, subtree: &Subtree, revision: u64) -> Option<NodeId> {
        if !self.is_alive(parent) {
            return None;
        }
        let seed = NodeSeed {
            content: subtree.content.clone(),
            style: subtree.style.clone(),
            flags: subtree.flags,
            ai_provider: subtree.ai_provider.clone(),
        };
        let id = self.alloc(seed, revision);
        self.link_parent(id, parent);
        for child in &subtree.children {
            self.graft(id, child, revision);
        }
        Some(id)
    }

    // --- internals ---

    fn alloc(&mut self, seed: NodeSeed, revision: u64) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, seed, revision));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, seed, revision)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }
}
