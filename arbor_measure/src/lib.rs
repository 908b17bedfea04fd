// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Measure: content-dependent node sizing.
//!
//! Given a node's text and font size, this crate computes the wrapped
//! display lines and the clamped bounding box that the layout engine
//! positions. Mind-map content mixes scripts, so wrapping weighs glyph
//! advances by display class (wide CJK glyphs take a full em, narrow
//! glyphs less) using `unicode-width` over grapheme clusters from
//! `unicode-segmentation`.
//!
//! Measurement is total: every input produces a result. Empty content
//! measures as one empty line at the minimum bounds; a budget too narrow
//! for a single glyph degrades to one glyph per line instead of looping.
//!
//! ## API overview
//!
//! - [`measure`]: the pure measurement function.
//! - [`NodeMeasurer`]: a per-node memoizing wrapper, generic over the
//!   caller's node handle type. Layout passes hit this cache for every
//!   node, so unchanged nodes are never re-wrapped.
//! - [`SizeBounds`] / [`SizingProfile`]: per-class box limits (the root
//!   gets a roomier minimum than branches and leaves).
//! - [`break_lines`] / [`glyph_advance`]: the underlying line breaker.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod measure;
mod wrap;

pub use measure::{
    LINE_HEIGHT_FACTOR, Measurement, NodeMeasurer, PADDING_X, PADDING_Y, SizeBounds, SizingProfile,
    measure,
};
pub use wrap::{BrokenLines, NARROW_FACTOR, WIDE_FACTOR, break_lines, glyph_advance};
