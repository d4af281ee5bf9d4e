// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor View: the host-side controller for the Arbor tree engine.
//!
//! `arbor_index`, `arbor_window`, and `arbor_reorder` are deliberately
//! stateless about the component hosting them. This crate supplies the
//! missing glue a mounted tree component needs:
//!
//! - [`TreeController`] owns the persistent projection state, the row
//!   window, the drag session, the active row, and an explicit rebuild
//!   revision. The index itself stays ephemeral: hosts rebuild it from the
//!   raw input whenever that input, a control prop, or the revision
//!   changes, and pass it into controller methods.
//! - [`Debounce`] models the engine's only timing concern — debounced
//!   search text and container resizes, latest call wins — on a
//!   host-passed clock, with no runtime or timer ownership.
//!
//! Everything is synchronous and single-threaded: projection writes and
//! window updates happen inside the calling event handler, and a rebuild
//! atomically replaces the previous index from the caller's point of view.
//!
//! ```rust
//! use arbor_index::{BuildOptions, SimpleNode, TreeIndex};
//! use arbor_view::TreeController;
//!
//! let roots = vec![SimpleNode::new("a").with_children(vec![
//!     SimpleNode::new("a1"),
//! ])];
//!
//! let mut controller = TreeController::new(24.0, 480.0, 48.0);
//! let index = TreeIndex::build(&roots, &BuildOptions::default(), controller.state_mut());
//!
//! let a = index.entry_by_key("a").unwrap();
//! controller.on_expand(&index, a, true);
//! assert_eq!(controller.rows(&index).len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod debounce;

pub use controller::{
    AUTOSCROLL_DEBOUNCE_MS, RESIZE_DEBOUNCE_MS, SEARCH_DEBOUNCE_MS, TreeController,
};
pub use debounce::Debounce;
