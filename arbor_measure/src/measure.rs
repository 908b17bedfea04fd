// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node bounding boxes and the memoizing measure cache.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::Size;

use crate::wrap::{BrokenLines, break_lines};

/// Horizontal padding inside a node box, per side.
pub const PADDING_X: f64 = 20.0;
/// Vertical padding inside a node box, per side.
pub const PADDING_Y: f64 = 10.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.5;

/// Min/max box dimensions for one class of node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeBounds {
    /// Smallest allowed box width.
    pub min_width: f64,
    /// Largest allowed box width; also the wrapping limit.
    pub max_width: f64,
    /// Smallest allowed box height.
    pub min_height: f64,
    /// Largest allowed box height.
    pub max_height: f64,
}

/// Per-class size bounds: root nodes get a roomier box than the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingProfile {
    /// Bounds for the root node.
    pub root: SizeBounds,
    /// Bounds for branch nodes.
    pub branch: SizeBounds,
    /// Bounds for leaf nodes.
    pub leaf: SizeBounds,
}

impl Default for SizingProfile {
    fn default() -> Self {
        Self {
            root: SizeBounds {
                min_width: 140.0,
                max_width: 320.0,
                min_height: 56.0,
                max_height: 240.0,
            },
            branch: SizeBounds {
                min_width: 120.0,
                max_width: 300.0,
                min_height: 48.0,
                max_height: 320.0,
            },
            leaf: SizeBounds {
                min_width: 120.0,
                max_width: 300.0,
                min_height: 44.0,
                max_height: 320.0,
            },
        }
    }
}

/// Measured box and wrapped lines for one node's content.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Box width, clamped into the node's bounds.
    pub width: f64,
    /// Box height, clamped into the node's bounds.
    pub height: f64,
    /// Wrapped display lines. Never empty.
    pub lines: Vec<String>,
}

impl Measurement {
    /// The measured box as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Measures `content` at `font_size` within `bounds`.
///
/// This is total: empty content measures as one empty line at the minimum
/// bounds, and degenerate budgets fall back to one glyph per line. The
/// wrapping budget is `bounds.max_width` less the horizontal padding.
#[must_use]
pub fn measure(content: &str, font_size: f64, bounds: &SizeBounds) -> Measurement {
    let budget = bounds.max_width - 2.0 * PADDING_X;
    let BrokenLines { lines, longest } = break_lines(content, font_size, budget);

    #[allow(
        clippy::cast_precision_loss,
        reason = "Line counts are far below 2^52."
    )]
    let text_height = lines.len() as f64 * font_size * LINE_HEIGHT_FACTOR;
    let width = (longest + 2.0 * PADDING_X).clamp(bounds.min_width, bounds.max_width);
    let height = (text_height + 2.0 * PADDING_Y).clamp(bounds.min_height, bounds.max_height);

    Measurement {
        width,
        height,
        lines,
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    content: String,
    font_bits: u64,
    bounds: SizeBounds,
    measurement: Measurement,
}

impl CacheEntry {
    fn new(content: &str, font_size: f64, bounds: SizeBounds) -> Self {
        Self {
            content: String::from(content),
            font_bits: font_size.to_bits(),
            bounds,
            measurement: measure(content, font_size, &bounds),
        }
    }

    fn matches(&self, content: &str, font_size: f64, bounds: &SizeBounds) -> bool {
        self.content == content && self.font_bits == font_size.to_bits() && self.bounds == *bounds
    }
}

/// A per-node memoizing wrapper around [`measure`].
///
/// Keyed by a caller-chosen node handle `K` (for example a document's
/// node id); the cached value is reused as long as the node's content,
/// font size, and bounds are unchanged. Callers should
/// [`invalidate`](NodeMeasurer::invalidate) a node's entry when its
/// content or font changes (a mismatched entry is also replaced lazily)
/// and may [`clear`](NodeMeasurer::clear) the whole cache on bulk changes
/// such as a theme switch or document load.
#[derive(Clone, Debug)]
pub struct NodeMeasurer<K> {
    cache: HashMap<K, CacheEntry>,
}

impl<K> Default for NodeMeasurer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NodeMeasurer<K> {
    /// Creates an empty measurer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached entry.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<K: Copy + Eq + Hash> NodeMeasurer<K> {
    /// Measures one node's content, reusing the cached result when the
    /// content, font size, and bounds all match the previous call.
    pub fn measure_node(
        &mut self,
        key: K,
        content: &str,
        font_size: f64,
        bounds: SizeBounds,
    ) -> &Measurement {
        match self.cache.entry(key) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().matches(content, font_size, &bounds) {
                    *occupied.get_mut() = CacheEntry::new(content, font_size, bounds);
                }
                &occupied.into_mut().measurement
            }
            Entry::Vacant(vacant) => {
                &vacant.insert(CacheEntry::new(content, font_size, bounds)).measurement
            }
        }
    }

    /// Like [`measure_node`](Self::measure_node) but returns just the box.
    pub fn size_of(&mut self, key: K, content: &str, font_size: f64, bounds: SizeBounds) -> Size {
        self.measure_node(key, content, font_size, bounds).size()
    }

    /// Drops the cached entry for one node.
    pub fn invalidate(&mut self, key: K) {
        self.cache.remove(&key);
    }
}
