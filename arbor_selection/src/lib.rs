// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Selection: single and multi selection state.
//!
//! [`Selection`] models the selection of a mind-map surface: an optional
//! **primary** node (the keyboard/edit target) plus an insertion-ordered
//! **multi-selection** set consumed by batch operations. The root node is
//! special throughout: it may be the sole primary, but it can never join
//! a multi-selection, so batch delete/move surfaces built on the
//! selection cannot target the root by construction.
//!
//! The type is generic over the node handle `K`, so it works with
//! `arbor_document::NodeId` or any application-specific id. It holds no
//! reference to the document; callers pass document-order ids into
//! [`Selection::select_all`] and prune with [`Selection::remove`] when
//! nodes are deleted.
//!
//! ## Example
//!
//! ```rust
//! use arbor_selection::Selection;
//!
//! let mut selection: Selection<u32> = Selection::new(0);
//! selection.toggle_multi(1);
//! selection.toggle_multi(2);
//! assert_eq!(selection.multi(), &[1, 2]);
//! assert_eq!(selection.primary(), Some(2), "primary tracks the latest toggle");
//!
//! // The root degrades to a plain single selection.
//! selection.toggle_multi(0);
//! assert_eq!(selection.primary(), Some(0));
//! assert!(selection.multi().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// Selection state over node handles of type `K`.
///
/// The multi-selection preserves toggle order (for "most recent" primary
/// tracking and stable batch iteration) alongside a set for O(1)
/// membership.
#[derive(Clone, Debug)]
pub struct Selection<K> {
    root: K,
    primary: Option<K>,
    order: Vec<K>,
    members: HashSet<K>,
}

impl<K: Copy + Eq + Hash> Selection<K> {
    /// Creates an empty selection for a document whose root is `root`.
    #[must_use]
    pub fn new(root: K) -> Self {
        Self {
            root,
            primary: None,
            order: Vec::new(),
            members: HashSet::new(),
        }
    }

    /// The root handle this selection special-cases.
    pub fn root(&self) -> K {
        self.root
    }

    /// Points the selection at a different document root and clears
    /// everything (used when a new document is loaded).
    pub fn reset_root(&mut self, root: K) {
        self.root = root;
        self.clear();
    }

    /// The primary (keyboard/edit target) node, if any.
    pub fn primary(&self) -> Option<K> {
        self.primary
    }

    /// The multi-selection in toggle order. Never contains the root.
    pub fn multi(&self) -> &[K] {
        &self.order
    }

    /// Whether nothing is selected at all.
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.order.is_empty()
    }

    /// Whether `id` is the primary or part of the multi-selection.
    pub fn is_selected(&self, id: K) -> bool {
        self.primary == Some(id) || self.members.contains(&id)
    }

    /// Whether `id` is part of the multi-selection.
    pub fn is_multi(&self, id: K) -> bool {
        self.members.contains(&id)
    }

    /// Selects `id` alone: it becomes the primary and the
    /// multi-selection is cleared.
    pub fn select(&mut self, id: K) {
        self.primary = Some(id);
        self.order.clear();
        self.members.clear();
    }

    /// Toggles `id`'s multi-selection membership.
    ///
    /// The root cannot be multi-selected; toggling it behaves like
    /// [`select`](Self::select). Otherwise the primary tracks the most
    /// recently toggled-in id: removing the current primary falls back to
    /// the most recent remaining member, and the primary becomes `None`
    /// when the multi-selection empties.
    pub fn toggle_multi(&mut self, id: K) {
        if id == self.root {
            self.select(id);
            return;
        }
        if self.members.remove(&id) {
            self.order.retain(|k| *k != id);
            if self.order.is_empty() {
                self.primary = None;
            } else if self.primary == Some(id) {
                self.primary = self.order.last().copied();
            }
        } else {
            self.members.insert(id);
            self.order.push(id);
            self.primary = Some(id);
        }
    }

    /// Replaces the multi-selection with every non-root id yielded by
    /// `ids` (callers pass document order). The primary becomes the last
    /// id taken, mirroring toggle-order tracking.
    pub fn select_all(&mut self, ids: impl IntoIterator<Item = K>) {
        self.clear();
        for id in ids {
            if id == self.root || !self.members.insert(id) {
                continue;
            }
            self.order.push(id);
        }
        self.primary = self.order.last().copied();
    }

    /// Drops `id` from the selection entirely (for example after the node
    /// was deleted), with the same primary fallback as a toggle-out.
    pub fn remove(&mut self, id: K) {
        if self.members.remove(&id) {
            self.order.retain(|k| *k != id);
        }
        if self.primary == Some(id) {
            self.primary = self.order.last().copied();
        }
    }

    /// Empties both the primary and the multi-selection.
    pub fn clear(&mut self) {
        self.primary = None;
        self.order.clear();
        self.members.clear();
    }
}
