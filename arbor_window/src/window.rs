// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row window controller and its computed slice.

/// Result of a window computation over a dense row strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSlice {
    /// First materialized row (inclusive).
    pub start: usize,
    /// One past the last materialized row (exclusive).
    pub end: usize,
    /// Total extent of rows before `start`.
    pub before_extent: f64,
    /// Total extent of rows after `end`.
    pub after_extent: f64,
    /// Total extent of the entire strip.
    pub content_extent: f64,
}

impl WindowSlice {
    /// Returns `true` if no rows are materialized.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    const EMPTY: Self = Self {
        start: 0,
        end: 0,
        before_extent: 0.0,
        after_extent: 0.0,
        content_extent: 0.0,
    };
}

/// Alignment mode when scrolling a specific row into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    /// Align the start (top/leading edge) of the row with the viewport.
    Start,
    /// Center the row within the viewport.
    Center,
    /// Align the end (bottom/trailing edge) of the row with the viewport.
    End,
    /// Move just enough to make the row fully visible, preferring the
    /// smallest change from the current scroll offset.
    Nearest,
}

/// Windowing controller for a strip of equally sized rows.
///
/// Stores the row count, the fixed per-row extent, the viewport extent,
/// the scroll offset, and overscan margins, and caches the most recently
/// computed [`WindowSlice`]. All extents live in one caller-chosen 1D
/// coordinate space (typically logical pixels) and are expected to be
/// finite and non-negative.
#[derive(Debug, Clone)]
pub struct RowWindow {
    len: usize,
    row_extent: f64,
    viewport_extent: f64,
    scroll_offset: f64,
    overscan_before: f64,
    overscan_after: f64,

    dirty: bool,
    last_slice: WindowSlice,
}

impl RowWindow {
    /// Creates a window over `len` rows of uniform `row_extent`, with the
    /// given `viewport_extent` and symmetric `overscan`.
    #[must_use]
    pub fn new(len: usize, row_extent: f64, viewport_extent: f64, overscan: f64) -> Self {
        Self {
            len,
            row_extent: row_extent.max(0.0),
            viewport_extent: viewport_extent.max(0.0),
            scroll_offset: 0.0,
            overscan_before: overscan.max(0.0),
            overscan_after: overscan.max(0.0),
            dirty: true,
            last_slice: WindowSlice::EMPTY,
        }
    }

    /// Number of rows in the strip.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the strip holds no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of rows in the strip.
    pub fn set_len(&mut self, len: usize) {
        if len != self.len {
            self.len = len;
            self.dirty = true;
        }
    }

    /// The fixed per-row extent.
    #[must_use]
    pub const fn row_extent(&self) -> f64 {
        self.row_extent
    }

    /// Sets the fixed per-row extent. Negative values clamp to zero.
    pub fn set_row_extent(&mut self, extent: f64) {
        debug_assert!(
            extent.is_finite(),
            "row extents must be finite; got {extent:?}"
        );
        let extent = extent.max(0.0);
        if extent != self.row_extent {
            self.row_extent = extent;
            self.dirty = true;
        }
    }

    /// The current viewport extent.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Sets the viewport extent (a container resize). This only marks the
    /// cached slice dirty; no other input is consulted on recompute.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        let extent = extent.max(0.0);
        if extent != self.viewport_extent {
            self.viewport_extent = extent;
            self.dirty = true;
        }
    }

    /// The current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset. Negative values clamp to zero.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = offset.max(0.0);
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.dirty = true;
        }
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Sets the overscan extents applied before and after the viewport.
    pub fn set_overscan(&mut self, before: f64, after: f64) {
        let before = before.max(0.0);
        let after = after.max(0.0);
        if before != self.overscan_before || after != self.overscan_after {
            self.overscan_before = before;
            self.overscan_after = after;
            self.dirty = true;
        }
    }

    /// Computes or returns the cached window slice.
    #[must_use]
    pub fn slice(&mut self) -> WindowSlice {
        if self.dirty {
            self.last_slice = compute_slice(
                self.len,
                self.row_extent,
                self.scroll_offset,
                self.viewport_extent,
                self.overscan_before,
                self.overscan_after,
            );
            self.dirty = false;
        }
        self.last_slice
    }

    /// Convenience iterator over the materialized row indices.
    pub fn materialized_indices(&mut self) -> impl Iterator<Item = usize> {
        let slice = self.slice();
        slice.start..slice.end
    }

    /// Returns `true` if row `index` is fully inside the viewport.
    #[must_use]
    pub fn is_row_fully_visible(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let row_start = index as f64 * self.row_extent;
        let row_end = row_start + self.row_extent;
        row_start >= self.scroll_offset
            && row_end <= self.scroll_offset + self.viewport_extent
    }

    /// Returns `true` if row `index` overlaps the viewport at all.
    #[must_use]
    pub fn is_row_partially_visible(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        let row_start = index as f64 * self.row_extent;
        let row_end = row_start + self.row_extent;
        row_end > self.scroll_offset && row_start < self.scroll_offset + self.viewport_extent
    }

    /// Clamps the scroll offset so the viewport stays within the content.
    pub fn clamp_scroll_to_content(&mut self) {
        let content = self.len as f64 * self.row_extent;
        let max_offset = (content - self.viewport_extent).max(0.0);
        if self.scroll_offset > max_offset {
            self.set_scroll_offset(max_offset);
        }
    }

    /// Scrolls so that row `index` is brought into view with `align`.
    ///
    /// Out-of-range indices clamp to the last row; an empty strip resets the
    /// offset to zero.
    pub fn scroll_to_index(&mut self, index: usize, align: ScrollAlign) {
        if self.len == 0 {
            self.set_scroll_offset(0.0);
            return;
        }
        let index = index.min(self.len - 1);
        let row_start = index as f64 * self.row_extent;
        let row_end = row_start + self.row_extent;
        let viewport = self.viewport_extent;

        let offset = match align {
            ScrollAlign::Start => row_start,
            ScrollAlign::End => (row_end - viewport).max(0.0),
            ScrollAlign::Center => ((row_start + row_end) / 2.0 - viewport / 2.0).max(0.0),
            ScrollAlign::Nearest => {
                let view_start = self.scroll_offset;
                let view_end = view_start + viewport;
                if row_start >= view_start && row_end <= view_end {
                    view_start
                } else if row_start < view_start {
                    row_start
                } else {
                    (row_end - viewport).max(0.0)
                }
            }
        };
        self.set_scroll_offset(offset);
    }
}

fn compute_slice(
    len: usize,
    row_extent: f64,
    scroll_offset: f64,
    viewport_extent: f64,
    overscan_before: f64,
    overscan_after: f64,
) -> WindowSlice {
    if len == 0 || row_extent <= 0.0 {
        return WindowSlice::EMPTY;
    }

    let content_extent = len as f64 * row_extent;
    let min = (scroll_offset - overscan_before).max(0.0);
    let max = (scroll_offset + viewport_extent + overscan_after).min(content_extent);

    if max <= min {
        // Degenerate viewport, or scrolled past the content end.
        return WindowSlice {
            start: 0,
            end: 0,
            before_extent: min,
            after_extent: (content_extent - min).max(0.0),
            content_extent,
        };
    }

    // Truncation is floor here: both operands are non-negative.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Values are clamped non-negative and bounded by `len` below."
    )]
    let start = ((min / row_extent) as usize).min(len - 1);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Values are clamped non-negative and bounded by `len` below."
    )]
    let mut end = (max / row_extent) as usize;
    // Cover a partially overlapped trailing row.
    if (end as f64) * row_extent < max {
        end += 1;
    }
    let end = end.min(len);

    WindowSlice {
        start,
        end,
        before_extent: start as f64 * row_extent,
        after_extent: (content_extent - end as f64 * row_extent).max(0.0),
        content_extent,
    }
}
