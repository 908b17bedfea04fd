// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Editor: the document mutation engine.
//!
//! [`Editor`] is the one write path into a mind-map document. Every
//! operation follows the same shape: resolve the target ids, mutate the
//! tree, re-run layout so frames are consistent again, and bump the
//! document revision exactly once. Operations referencing stale ids, and
//! edits that would change nothing, are silent no-ops that leave the
//! revision untouched; the mutation API is total over its input domain.
//!
//! The engine holds no global state and publishes no notifications.
//! Hosts read the current state through [`Editor::document`] and detect
//! change by watching the revision counter; `arbor_history` builds
//! snapshot recording on exactly that signal. Undo/redo re-enters a
//! snapshot through [`Editor::restore`], which deliberately skips layout:
//! frames are part of the snapshot.
//!
//! AI-driven batch inserts go through [`Editor::add_children`], the same
//! contract as any manual insert, with nodes tagged as AI-generated and
//! stamped with the provider id. An AI caller that wants to cancel simply
//! never invokes the mutation API.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use arbor_document::{
    Direction, Document, NodeId, NodeSeed, StylePatch, Subtree,
};
use arbor_layout::{LayoutConfig, layout};
use arbor_measure::NodeMeasurer;

/// A partial node update; `None`/empty fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeEdit {
    /// Replacement content, if any.
    pub content: Option<String>,
    /// Style fields to merge.
    pub style: StylePatch,
}

impl NodeEdit {
    /// An edit that only replaces the content.
    #[must_use]
    pub fn content(content: String) -> Self {
        Self {
            content: Some(content),
            ..Self::default()
        }
    }

    /// An edit that only patches the style.
    #[must_use]
    pub fn style(style: StylePatch) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
}

/// The mutation engine: a document plus the measurer and layout
/// configuration needed to keep it consistent.
///
/// ## Example
///
/// ```rust
/// use arbor_editor::Editor;
/// use arbor_document::NodeKind;
///
/// let mut editor = Editor::new(1, "Topic");
/// let root = editor.document().root();
/// let a = editor.add_child(root, "A").unwrap();
/// let b = editor.add_sibling(a, "B").unwrap();
///
/// let doc = editor.document();
/// assert_eq!(doc.kind(root), Some(NodeKind::Branch));
/// assert_eq!(doc.children_of(root), &[a, b]);
/// assert!(doc.frame(b).is_some(), "mutations leave the document laid out");
/// ```
#[derive(Debug)]
pub struct Editor {
    document: Document,
    measurer: NodeMeasurer<NodeId>,
    config: LayoutConfig,
    clipboard: Option<Subtree>,
}

impl Editor {
    /// Creates an editor around a fresh document holding only a root
    /// node, laid out once.
    pub fn new(id: u64, title: &str) -> Self {
        Self::with_config(id, title, LayoutConfig::default())
    }

    /// Like [`Editor::new`] with explicit layout parameters.
    pub fn with_config(id: u64, title: &str, config: LayoutConfig) -> Self {
        let mut editor = Self {
            document: Document::new(id, title),
            measurer: NodeMeasurer::new(),
            config,
            clipboard: None,
        };
        editor.relayout();
        editor
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The active layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Current document revision; bumps exactly once per real mutation.
    pub fn revision(&self) -> u64 {
        self.document.revision()
    }

    /// Replaces the document with an externally loaded one (open file,
    /// restore autosave). Clears the measure cache and lays the new
    /// document out.
    pub fn load(&mut self, document: Document) {
        self.document = document;
        self.measurer.clear();
        self.relayout();
    }

    /// Re-enters a history snapshot verbatim.
    ///
    /// No layout pass runs: the snapshot's frames are already consistent,
    /// so undo/redo only needs a re-render.
    pub fn restore(&mut self, snapshot: Document) {
        self.document = snapshot;
    }

    // --- node operations ---

    /// Appends a new leaf under `parent`. Returns `None` (changing
    /// nothing) if `parent` is not in the document.
    pub fn add_child(&mut self, parent: NodeId, content: &str) -> Option<NodeId> {
        if !self.document.is_alive(parent) {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?parent, content, "add child");
        let rev = self.document.bump_revision();
        let id = self
            .document
            .insert_child(parent, NodeSeed::with_content(String::from(content)), rev)?;
        self.relayout();
        Some(id)
    }

    /// Appends a new leaf after `id` under the same parent. Returns
    /// `None` for the root (which has no parent) and for stale ids.
    pub fn add_sibling(&mut self, id: NodeId, content: &str) -> Option<NodeId> {
        let parent = self.document.parent_of(id)?;
        self.add_child(parent, content)
    }

    /// Batch insert of generated content under one parent: every new node
    /// is tagged AI-generated with `provider`, and the whole batch is one
    /// revision (one history entry).
    ///
    /// Returns the new ids, or an empty list if `parent` is stale or
    /// `contents` is empty.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        contents: &[&str],
        provider: &str,
    ) -> Vec<NodeId> {
        if !self.document.is_alive(parent) || contents.is_empty() {
            return Vec::new();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?parent, count = contents.len(), provider, "add generated children");
        let rev = self.document.bump_revision();
        let mut ids = Vec::with_capacity(contents.len());
        for &content in contents {
            let seed = NodeSeed {
                content: String::from(content),
                ai_provider: Some(String::from(provider)),
                ..NodeSeed::default()
            };
            if let Some(id) = self.document.insert_child(parent, seed, rev) {
                ids.push(id);
            }
        }
        self.relayout();
        ids
    }

    /// Removes `id` and its whole subtree. No-op (returns `false`) for
    /// the root and for stale ids.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        let removed = self.document.remove_subtree(id);
        if removed.is_empty() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, subtree = removed.len(), "delete node");
        for r in removed {
            self.measurer.invalidate(r);
        }
        self.document.bump_revision();
        self.relayout();
        true
    }

    /// Removes several targets in one logical step (one revision).
    ///
    /// Each target is re-resolved fresh, so a target that was already
    /// removed as part of an earlier target's subtree is skipped rather
    /// than failing. Returns how many targets were actually removed.
    pub fn delete_batch(&mut self, ids: &[NodeId]) -> usize {
        let mut removed_targets = 0;
        for &id in ids {
            let removed = self.document.remove_subtree(id);
            if !removed.is_empty() {
                removed_targets += 1;
                for r in removed {
                    self.measurer.invalidate(r);
                }
            }
        }
        if removed_targets > 0 {
            self.document.bump_revision();
            self.relayout();
        }
        removed_targets
    }

    /// Moves `id` (with its subtree) to the end of `new_parent`'s
    /// children. No-op (returns `false`) when the move would detach the
    /// root, target the node itself, or create a cycle by moving a node
    /// into its own subtree.
    pub fn move_node(&mut self, id: NodeId, new_parent: NodeId) -> bool {
        if !self.document.reparent(id, new_parent) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?id, ?new_parent, "move node");
        let rev = self.document.bump_revision();
        self.document.stamp_modified(id, rev);
        self.relayout();
        true
    }

    /// Shallow-merges `edit` into the node. Returns whether anything
    /// changed; unchanged edits do not bump the revision.
    pub fn update_node(&mut self, id: NodeId, edit: &NodeEdit) -> bool {
        if !self.document.is_alive(id) {
            return false;
        }
        let mut changed = false;
        if let Some(content) = &edit.content {
            changed |= self.document.set_content(id, content);
        }
        changed |= self.document.apply_style(id, &edit.style);
        if !changed {
            return false;
        }
        self.measurer.invalidate(id);
        let rev = self.document.bump_revision();
        self.document.stamp_modified(id, rev);
        self.relayout();
        true
    }

    /// Flips a node's collapsed state and re-lays-out (the hidden subtree
    /// drops out of sizing). Returns the new state, or `None` for stale
    /// ids.
    pub fn toggle_collapse(&mut self, id: NodeId) -> Option<bool> {
        let state = self.document.toggle_collapsed(id)?;
        let rev = self.document.bump_revision();
        self.document.stamp_modified(id, rev);
        self.relayout();
        Some(state)
    }

    /// Applies one style patch to every target (the root included) in one
    /// logical step. Returns how many nodes actually changed; when none
    /// do, the revision is untouched.
    pub fn batch_apply_style(&mut self, ids: &[NodeId], patch: &StylePatch) -> usize {
        let mut touched = Vec::new();
        for &id in ids {
            if self.document.apply_style(id, patch) {
                self.measurer.invalidate(id);
                touched.push(id);
            }
        }
        if touched.is_empty() {
            return 0;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(count = touched.len(), "batch style");
        let rev = self.document.bump_revision();
        for id in &touched {
            self.document.stamp_modified(*id, rev);
        }
        self.relayout();
        touched.len()
    }

    // --- clipboard ---

    /// Copies `id`'s subtree to the internal clipboard. Copying does not
    /// mutate the document. Returns `false` for stale ids.
    pub fn copy_subtree(&mut self, id: NodeId) -> bool {
        match self.document.extract_subtree(id) {
            Some(subtree) => {
                self.clipboard = Some(subtree);
                true
            }
            None => false,
        }
    }

    /// The current clipboard contents, if any.
    pub fn clipboard(&self) -> Option<&Subtree> {
        self.clipboard.as_ref()
    }

    /// Grafts a copy of the clipboard under `parent` with fresh ids
    /// throughout. Returns the pasted root id, or `None` when the
    /// clipboard is empty or `parent` is stale.
    pub fn paste_subtree(&mut self, parent: NodeId) -> Option<NodeId> {
        if !self.document.is_alive(parent) {
            return None;
        }
        let subtree = self.clipboard.clone()?;
        let rev = self.document.bump_revision();
        let id = self.document.graft(parent, &subtree, rev)?;
        self.relayout();
        Some(id)
    }

    // --- document-level operations ---

    /// Renames the document. Identical titles are a no-op.
    pub fn set_title(&mut self, title: &str) -> bool {
        if !self.document.set_title(title) {
            return false;
        }
        self.document.bump_revision();
        true
    }

    /// Switches the layout direction and re-lays-out. Setting the current
    /// direction again is a no-op.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.document.set_direction(direction) {
            return false;
        }
        self.document.bump_revision();
        self.relayout();
        true
    }

    fn relayout(&mut self) {
        layout(&mut self.document, &mut self.measurer, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use arbor_document::{NodeFlags, NodeId, NodeKind};
    use arbor_history::Recorder;
    use arbor_selection::Selection;

    /// Checks the structural invariants that must survive any operation
    /// sequence: one root, kinds matching structure, parent/child links
    /// consistent, and every visible node placed.
    fn assert_invariants(doc: &Document) {
        let ids: Vec<NodeId> = doc.iter().collect();
        assert_eq!(ids.len(), doc.node_count(), "iteration covers every live node");

        let mut roots = 0;
        for &id in &ids {
            match doc.kind(id).expect("iterated ids are live") {
                NodeKind::Root => {
                    roots += 1;
                    assert!(doc.parent_of(id).is_none(), "root has no parent");
                }
                NodeKind::Branch => {
                    assert!(doc.parent_of(id).is_some());
                    assert!(!doc.children_of(id).is_empty());
                }
                NodeKind::Leaf => {
                    assert!(doc.parent_of(id).is_some());
                    assert!(doc.children_of(id).is_empty());
                }
            }
            for &child in doc.children_of(id) {
                assert_eq!(doc.parent_of(child), Some(id), "child links back to parent");
            }
        }
        assert_eq!(roots, 1, "exactly one root");
        check_frames(doc, doc.root(), false);
    }

    fn check_frames(doc: &Document, id: NodeId, hidden: bool) {
        if hidden {
            assert!(doc.frame(id).is_none(), "hidden nodes must not keep frames");
        } else {
            assert!(doc.frame(id).is_some(), "visible nodes must be placed");
        }
        let hide_children = hidden || doc.is_collapsed(id);
        for &child in doc.children_of(id) {
            check_frames(doc, child, hide_children);
        }
    }

    #[test]
    fn scenario_two_children_under_root() {
        let mut editor = Editor::new(1, "Topic");
        let root = editor.document().root();
        let a = editor.add_child(root, "A").unwrap();
        let b = editor.add_child(root, "B").unwrap();

        let doc = editor.document();
        assert_eq!(doc.kind(root), Some(NodeKind::Branch));
        assert_eq!(doc.children_of(root), &[a, b]);

        let root_frame = doc.frame(root).unwrap();
        let a_frame = doc.frame(a).unwrap();
        let b_frame = doc.frame(b).unwrap();
        let spacing = editor.config().level_spacing;
        assert_eq!(a_frame.x0, root_frame.width() + spacing);
        assert_eq!(b_frame.x0, a_frame.x0);
        assert!(b_frame.y0 > a_frame.y0);
        let pair_center = (a_frame.center().y + b_frame.center().y) / 2.0;
        assert!((pair_center - root_frame.center().y).abs() < 1e-9);
    }

    #[test]
    fn deleting_a_branch_removes_its_grandchildren() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let parent = editor.add_child(root, "parent").unwrap();
        let g1 = editor.add_child(parent, "g1").unwrap();
        let g2 = editor.add_child(parent, "g2").unwrap();

        assert!(editor.delete_node(parent));
        let doc = editor.document();
        assert!(!doc.is_alive(parent));
        assert!(!doc.is_alive(g1));
        assert!(!doc.is_alive(g2));
        assert_eq!(doc.kind(root), Some(NodeKind::Root));
        assert_eq!(doc.children_of(root), &[]);
        assert_invariants(doc);
    }

    #[test]
    fn batch_style_hits_exactly_the_selection() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let x = editor.add_child(root, "X").unwrap();
        let y = editor.add_child(root, "Y").unwrap();
        let z = editor.add_child(root, "Z").unwrap();

        let mut selection: Selection<NodeId> = Selection::new(root);
        selection.toggle_multi(x);
        selection.toggle_multi(y);

        let patch = StylePatch {
            font_weight: Some(700),
            ..StylePatch::default()
        };
        let changed = editor.batch_apply_style(selection.multi(), &patch);
        assert_eq!(changed, 2);

        let doc = editor.document();
        assert_eq!(doc.style(x).unwrap().font_weight, 700);
        assert_eq!(doc.style(y).unwrap().font_weight, 700);
        assert_eq!(doc.style(z).unwrap().font_weight, 400, "unselected sibling unchanged");
    }

    #[test]
    fn select_all_then_batch_delete_leaves_a_lone_root() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        let _deep = editor.add_child(a, "deep").unwrap();
        let _b = editor.add_child(root, "b").unwrap();

        let mut selection: Selection<NodeId> = Selection::new(root);
        selection.select_all(editor.document().iter());
        assert_eq!(selection.multi().len(), 3, "every node but the root");

        // Nested targets appear in the selection; the batch must cope.
        let removed = editor.delete_batch(selection.multi());
        assert_eq!(removed, 2, "the nested leaf went with its parent");
        assert_eq!(editor.document().node_count(), 1);
        assert_invariants(editor.document());
    }

    #[test]
    fn move_into_own_subtree_is_rejected() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        let b = editor.add_child(a, "b").unwrap();

        let before = editor.revision();
        assert!(!editor.move_node(a, b), "descendant target would be a cycle");
        assert!(!editor.move_node(a, a), "self target");
        assert!(!editor.move_node(root, a), "root cannot move");
        assert_eq!(editor.revision(), before, "rejected moves do not bump");
        assert_eq!(editor.document().parent_of(a), Some(root));
        assert_invariants(editor.document());
    }

    #[test]
    fn move_reattaches_and_rederives_kinds() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        let b = editor.add_child(a, "b").unwrap();
        let c = editor.add_child(root, "c").unwrap();

        assert!(editor.move_node(b, c));
        let doc = editor.document();
        assert_eq!(doc.kind(a), Some(NodeKind::Leaf), "old parent is childless");
        assert_eq!(doc.kind(c), Some(NodeKind::Branch));
        assert_eq!(doc.parent_of(b), Some(c));
        assert_invariants(doc);
    }

    #[test]
    fn stale_targets_are_silent_no_ops() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        editor.delete_node(a);

        let before = editor.revision();
        assert_eq!(editor.add_child(a, "x"), None);
        assert_eq!(editor.add_sibling(a, "x"), None);
        assert!(!editor.delete_node(a));
        assert!(!editor.move_node(a, root));
        assert!(!editor.update_node(a, &NodeEdit::content("x".to_string())));
        assert_eq!(editor.toggle_collapse(a), None);
        assert_eq!(editor.revision(), before, "no-ops never bump the revision");
    }

    #[test]
    fn root_has_no_siblings() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        assert_eq!(editor.add_sibling(root, "nope"), None);
    }

    #[test]
    fn update_node_bumps_only_on_change() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();

        let before = editor.revision();
        assert!(editor.update_node(a, &NodeEdit::content("renamed".to_string())));
        assert_eq!(editor.revision(), before + 1);
        assert_eq!(editor.document().metadata(a).unwrap().modified, before + 1);

        assert!(
            !editor.update_node(a, &NodeEdit::content("renamed".to_string())),
            "identical content is a no-op"
        );
        assert!(!editor.update_node(a, &NodeEdit::default()));
        assert_eq!(editor.revision(), before + 1);
    }

    #[test]
    fn delete_batch_tolerates_nested_targets() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let parent = editor.add_child(root, "parent").unwrap();
        let child = editor.add_child(parent, "child").unwrap();
        let other = editor.add_child(root, "other").unwrap();

        let before = editor.revision();
        // `child` is gone once `parent`'s subtree is removed; the batch
        // must skip it rather than fail.
        let removed = editor.delete_batch(&[parent, child, other]);
        assert_eq!(removed, 2);
        assert_eq!(editor.revision(), before + 1, "one revision for the batch");
        assert_eq!(editor.document().node_count(), 1);
        assert_invariants(editor.document());
    }

    #[test]
    fn generated_batch_is_tagged_and_single_revision() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();

        let before = editor.revision();
        let ids = editor.add_children(root, &["one", "two", "three"], "provider-x");
        assert_eq!(ids.len(), 3);
        assert_eq!(editor.revision(), before + 1);

        let doc = editor.document();
        for id in ids {
            assert!(doc.flags(id).unwrap().contains(NodeFlags::AI_GENERATED));
            assert_eq!(doc.metadata(id).unwrap().ai_provider.as_deref(), Some("provider-x"));
        }
        assert!(editor.add_children(root, &[], "provider-x").is_empty());
        assert_eq!(editor.revision(), before + 1);
    }

    #[test]
    fn copy_paste_duplicates_with_fresh_ids() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        let _b = editor.add_child(a, "b").unwrap();

        assert!(editor.copy_subtree(a));
        let pasted = editor.paste_subtree(root).unwrap();
        assert_ne!(pasted, a);

        let doc = editor.document();
        assert_eq!(doc.content(pasted), Some("a"));
        assert_eq!(doc.children_of(pasted).len(), 1);
        assert_eq!(doc.node_count(), 5);
        assert_invariants(doc);

        // Pasting again yields another independent copy.
        let again = editor.paste_subtree(root).unwrap();
        assert_ne!(again, pasted);
        assert_eq!(editor.document().node_count(), 7);
    }

    #[test]
    fn collapse_toggle_twice_restores_layout_through_the_editor() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let a = editor.add_child(root, "a").unwrap();
        let _inner = editor.add_child(a, "inner").unwrap();
        let _b = editor.add_child(root, "b").unwrap();

        let before: Vec<_> = editor
            .document()
            .iter()
            .map(|id| (id, editor.document().frame(id)))
            .collect();

        assert_eq!(editor.toggle_collapse(a), Some(true));
        assert_eq!(editor.toggle_collapse(a), Some(false));

        let after: Vec<_> = editor
            .document()
            .iter()
            .map(|id| (id, editor.document().frame(id)))
            .collect();
        assert_eq!(after, before);
    }

    #[test]
    fn history_round_trip_restores_every_state() {
        let mut editor = Editor::new(1, "Topic");
        let root = editor.document().root();
        let mut recorder: Recorder<Document> = Recorder::new();
        recorder.record_if_changed(editor.revision(), || editor.document().clone());

        for i in 0..4 {
            editor.add_child(root, &format!("n{i}"));
            recorder.record_if_changed(editor.revision(), || editor.document().clone());
        }
        let final_state = editor.document().clone();

        // Walk all the way back, then all the way forward.
        let mut undone = 0;
        while let Some(snapshot) = recorder.undo().cloned() {
            editor.restore(snapshot);
            undone += 1;
        }
        assert_eq!(undone, 4);
        assert_eq!(editor.document().node_count(), 1, "back at the initial state");

        let mut redone = 0;
        while let Some(snapshot) = recorder.redo().cloned() {
            editor.restore(snapshot);
            redone += 1;
        }
        assert_eq!(redone, 4);
        assert_eq!(*editor.document(), final_state, "content-equal after the round trip");
        assert_invariants(editor.document());
    }

    #[test]
    fn recorder_skips_unchanged_documents() {
        let mut editor = Editor::new(1, "t");
        let root = editor.document().root();
        let mut recorder: Recorder<Document> = Recorder::new();

        assert!(recorder.record_if_changed(editor.revision(), || editor.document().clone()));
        assert!(
            !recorder.record_if_changed(editor.revision(), || editor.document().clone()),
            "same revision must not be recorded twice"
        );

        editor.add_child(root, "a");
        assert!(recorder.record_if_changed(editor.revision(), || editor.document().clone()));
    }

    /// A small deterministic generator, enough to drive a mixed operation
    /// sequence without pulling in a fuzzing dependency.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            self.0 >> 16
        }

        fn pick(&mut self, n: usize) -> usize {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Values are reduced modulo small collection sizes."
            )]
            {
                (self.next() % n as u64) as usize
            }
        }
    }

    #[test]
    fn invariants_survive_arbitrary_operation_sequences() {
        let mut editor = Editor::new(1, "fuzz");
        let root = editor.document().root();
        let mut rng = Lcg(0x5eed);

        // Known ids, deliberately including ids that have become stale.
        let mut ids: Vec<NodeId> = alloc::vec![root];

        for step in 0..300 {
            let target = ids[rng.pick(ids.len())];
            match rng.next() % 7 {
                0 | 1 => {
                    if let Some(id) = editor.add_child(target, &format!("n{step}")) {
                        ids.push(id);
                    }
                }
                2 => {
                    if let Some(id) = editor.add_sibling(target, &format!("s{step}")) {
                        ids.push(id);
                    }
                }
                3 => {
                    editor.delete_node(target);
                }
                4 => {
                    let dest = ids[rng.pick(ids.len())];
                    editor.move_node(target, dest);
                }
                5 => {
                    editor.toggle_collapse(target);
                }
                _ => {
                    editor.update_node(target, &NodeEdit::content(format!("u{step}")));
                }
            }
            assert_invariants(editor.document());
        }
        assert!(editor.document().node_count() >= 1);
    }
}
