// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width-weighted line breaking.
//!
//! Mind-map content routinely mixes scripts, so the advance of a glyph is
//! weighted by its display class: wide glyphs (CJK, fullwidth forms) take
//! a full em, narrow glyphs roughly six tenths, and zero-width glyphs
//! (combining marks) nothing. Classification comes from `unicode-width`
//! and iteration runs over grapheme clusters, so emoji and ZWJ sequences
//! are never split.

use alloc::string::String;
use alloc::vec::Vec;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Advance factor for wide (double-cell) glyphs, in ems.
pub const WIDE_FACTOR: f64 = 1.0;
/// Advance factor for narrow (single-cell) glyphs, in ems.
pub const NARROW_FACTOR: f64 = 0.6;

/// Estimated advance of one grapheme cluster at the given font size.
#[must_use]
pub fn glyph_advance(grapheme: &str, font_size: f64) -> f64 {
    match grapheme.width() {
        0 => 0.0,
        1 => NARROW_FACTOR * font_size,
        _ => WIDE_FACTOR * font_size,
    }
}

/// Result of breaking one piece of content into lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrokenLines {
    /// The broken lines, in order. Never empty: empty content yields one
    /// empty line.
    pub lines: Vec<String>,
    /// Estimated width of the widest line.
    pub longest: f64,
}

/// Breaks `content` into lines no wider than `budget`.
///
/// Explicit `\n` characters are hard breaks applied first; each hard line
/// is then wrapped by accumulating grapheme advances. A line breaks when
/// the next glyph would exceed the budget, but a line always receives at
/// least one glyph, so a zero or negative budget degrades to one glyph
/// per line rather than looping.
#[must_use]
pub fn break_lines(content: &str, font_size: f64, budget: f64) -> BrokenLines {
    let mut out = BrokenLines::default();
    for hard_line in content.split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0_f64;
        for grapheme in hard_line.graphemes(true) {
            let advance = glyph_advance(grapheme, font_size);
            if !line.is_empty() && line_width + advance > budget {
                out.longest = out.longest.max(line_width);
                out.lines.push(core::mem::take(&mut line));
                line_width = 0.0;
            }
            line.push_str(grapheme);
            line_width += advance;
        }
        out.longest = out.longest.max(line_width);
        out.lines.push(line);
    }
    out
}
