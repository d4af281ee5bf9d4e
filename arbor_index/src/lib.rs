// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Index: a flat, key-addressable index over caller-owned tree data.
//!
//! Arbor Index is the core of the Arbor tree engine. It derives a flat list
//! of entries — one per accepted node, in pre-order — from an arbitrary
//! caller-owned hierarchy, and projects four independent state dimensions
//! over it: **checked**, **expanded**, **disabled**, and **searched**, plus
//! the derived **indeterminate** and **visible** reads.
//!
//! The engine never owns the caller's data. A [`TreeIndex`] borrows the raw
//! nodes for the lifetime of one build and is rebuilt whenever the raw input
//! or a control prop changes; what persists across rebuilds is the
//! [`TreeState`] value — the key-indexed backing maps — owned by the hosting
//! component and passed into every build so toggles survive structural
//! change.
//!
//! ## Where this fits
//!
//! - [`TreeIndex`] (this crate): identity, structure, projections,
//!   visibility.
//! - `arbor_window`: maps the visible sequence onto a bounded, materialized
//!   row window.
//! - `arbor_reorder`: resolves drag targets and splices the raw input.
//! - `arbor_view`: the host-side controller tying the three together.
//!
//! ## Propagation rules
//!
//! Each projection has its own rule, applied by the write methods on
//! [`TreeIndex`]:
//!
//! - Checking cascades down onto every enabled descendant; un-checking also
//!   clears every ancestor's stored value so they recompute from children.
//!   Reading checks stored state, then ancestor inheritance, then child
//!   recomputation. "Some but not all descendants checked" reads as
//!   indeterminate and forces the entry's own checked value false.
//! - Expansion never propagates implicitly; an explicit collapse records
//!   collapsed state on the whole subtree.
//! - Disabled inherits from ancestors on read.
//! - Search marks matching nodes during the build only; revealing matches is
//!   the explicit [`TreeIndex::expansion_keys_for_matches`] step.
//!
//! ## Minimal example
//!
//! ```rust
//! use arbor_index::{BuildOptions, SimpleNode, TreeIndex, TreeState};
//!
//! let roots = vec![SimpleNode::new("a").with_children(vec![
//!     SimpleNode::new("a1"),
//!     SimpleNode::new("a2"),
//! ])];
//!
//! let mut state = TreeState::new();
//! let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);
//!
//! // Checking the parent cascades to the leaves…
//! let a = index.entry_by_key("a").unwrap();
//! index.set_checked(a, true, &mut state);
//! let a1 = index.entry_by_key("a1").unwrap();
//! assert!(index.is_checked(a1, &state));
//!
//! // …and expansion drives visibility.
//! assert_eq!(index.visible(&state).len(), 1);
//! index.set_expanded(a, true, &mut state);
//! assert_eq!(index.visible(&state).len(), 3);
//! ```
//!
//! Entry identity within one build is [`EntryId`] (a plain arena index);
//! identity across builds is the derived [`NodeKey`]. Duplicated keys are
//! not detected: the last-built entry wins in the key lookup. Cyclic input
//! is unrepresentable, since children are owned sequences.
//!
//! ## Features
//!
//! - `serde`: serialization for [`TreeSnapshot`] and [`NodeKey`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod key;
mod node;
mod projection;
mod state;
mod types;

pub use index::{
    Ancestors, BuildOptions, ExpandPolicy, IndexEntry, Row, SearchQuery, TreeIndex,
};
pub use key::resolve_key;
pub use node::{SimpleNode, TreeNode};
pub use state::{CheckWrite, TreeSnapshot, TreeState};
pub use types::{EntryId, LeafHint, NodeKey, RowFlags};
