// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Window: fixed-extent 1D windowing for virtualized rows.
//!
//! This crate maps a dense strip of equally sized rows — typically the
//! visible sequence produced by `arbor_index` — onto the bounded slice that
//! must actually be materialized for rendering, given a scroll offset, a
//! viewport extent, and overscan margins on both ends.
//!
//! It deliberately knows nothing about trees, widgets, or any UI framework.
//! Hosts are responsible for:
//!
//! - feeding in the current row count and measured viewport extent,
//! - diffing the returned `[start, end)` range to create/destroy rows,
//! - placing `before_extent` / `after_extent` worth of spacer around the
//!   materialized chunk.
//!
//! A viewport resize is a setter plus recompute on this type; it never
//! requires rebuilding whatever produced the row sequence.
//!
//! ## Minimal example
//!
//! ```rust
//! use arbor_window::RowWindow;
//!
//! // 100 visible rows, each 20 units tall, in a 200-unit viewport with
//! // 40 units of overscan on both ends.
//! let mut window = RowWindow::new(100, 20.0, 200.0, 40.0);
//! window.set_scroll_offset(100.0);
//!
//! let slice = window.slice();
//! assert!(slice.start < slice.end);
//! assert_eq!(slice.content_extent, 2000.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod window;

pub use window::{RowWindow, ScrollAlign, WindowSlice};
