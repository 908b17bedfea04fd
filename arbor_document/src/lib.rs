// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_document --heading-base-level=0

//! Arbor Document: the mind-map document model.
//!
//! Arbor Document is the data layer of the Arbor mind-map core.
//!
//! - Represents one rooted tree of content nodes with ordered children,
//!   per-node text style, state flags, and change-tracking metadata.
//! - Stores nodes in a generational arena, so id lookup is O(1) and a
//!   deleted node's id can never alias a live node.
//! - Derives node kind (root/branch/leaf) from structure instead of
//!   storing it, so the kind invariant holds under any mutation.
//!
//! ## Where this fits
//!
//! The Arbor crates separate concerns the same way throughout:
//! - Document model: structure and data (this crate).
//! - Measurement: content-dependent node sizing (`arbor_measure`).
//! - Layout: position assignment (`arbor_layout`).
//! - Editing: the public mutation engine (`arbor_editor`).
//!
//! This crate deliberately contains no layout policy and no sizing. It
//! offers the structural primitives (insert, subtree removal, reparent
//! with a cycle guard, subtree copy/graft) that the mutation engine
//! composes into user-facing operations. Structure-changing methods
//! referencing stale ids are silent no-ops, which keeps the public
//! mutation API total.
//!
//! ## Revisions
//!
//! A [`Document`] carries a monotonic revision counter in place of
//! wall-clock timestamps. The mutation engine bumps it exactly once per
//! real operation; collaborators (history recording, autosave) detect
//! change by watching [`Document::revision`]. No-op operations leave the
//! revision untouched, so an unchanged document is never re-recorded.
//!
//! ## API overview
//!
//! - [`Document`]: the arena plus document-level data (title, direction).
//! - [`NodeId`]: generational handle of a node.
//! - [`NodeKind`]: derived root/branch/leaf role.
//! - [`NodeFlags`]: collapsed and AI-generated state bits.
//! - [`NodeStyle`] / [`StylePatch`]: text style and partial updates.
//! - [`NodeSeed`]: initial data for insertion.
//! - [`Subtree`]: id-free deep copy used for clipboard copy/paste.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Document;
pub use types::{
    Direction, NodeFlags, NodeId, NodeKind, NodeMetadata, NodeSeed, NodeStyle, StylePatch, Subtree,
};
