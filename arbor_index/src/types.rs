// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vocabulary types shared across the engine.

use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier derived for one raw node.
///
/// Keys are resolved during the index build (see [`resolve_key`](crate::resolve_key))
/// and are the only node identity that survives a rebuild. They key the
/// persistent projection maps in [`TreeState`](crate::TreeState) and the
/// index-by-key lookup on [`TreeIndex`](crate::TreeIndex).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeKey(String);

impl NodeKey {
    /// Wraps an already-derived key string.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self(String::from(key))
    }
}

impl AsRef<str> for NodeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of an entry within one build's arena.
///
/// An `EntryId` is only meaningful for the [`TreeIndex`](crate::TreeIndex)
/// build that produced it: a rebuild discards and renumbers every entry, so
/// ids must not be held across builds. Unlike long-lived node handles, there
/// is no generation counter to catch staleness; accessors bounds-check and
/// return `None`/empty for out-of-range ids instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(u32);

impl EntryId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Entry ids use 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// The arena slot this id addresses.
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// How a raw node describes its own leaf-ness.
///
/// The original duck-typed value-or-function field distills to this tagged
/// union, resolved once per node during the index build.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LeafHint {
    /// Derive from the indexed child list: no children means leaf.
    #[default]
    Auto,
    /// Always a leaf, even with children present in the raw data.
    Leaf,
    /// Always a branch, even with no children (e.g. not yet loaded).
    Branch,
}

bitflags::bitflags! {
    /// Packed per-row projection state handed to renderers.
    ///
    /// See [`TreeIndex::row`](crate::TreeIndex::row) for how a flag set is
    /// materialized from the index and a [`TreeState`](crate::TreeState).
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct RowFlags: u8 {
        /// The entry reads checked.
        const CHECKED = 1 << 0;
        /// Some but not all descendants are checked.
        const INDETERMINATE = 1 << 1;
        /// The entry reads expanded.
        const EXPANDED = 1 << 2;
        /// The entry reads disabled (own flag or inherited).
        const DISABLED = 1 << 3;
        /// The entry matched the build's search query.
        const SEARCHED = 1 << 4;
        /// Every ancestor is expanded; the entry is renderable.
        const VISIBLE = 1 << 5;
        /// The entry resolved as a leaf.
        const LEAF = 1 << 6;
    }
}

#[cfg(test)]
mod tests {
    use super::{EntryId, NodeKey, RowFlags};

    #[test]
    fn node_key_borrows_as_str() {
        let key = NodeKey::from("a-1");
        assert_eq!(key.as_str(), "a-1");
        assert_eq!(alloc::format!("{key}"), "a-1");
    }

    #[test]
    fn entry_id_round_trips_index() {
        let id = EntryId::new(42);
        assert_eq!(id.idx(), 42);
    }

    #[test]
    fn row_flags_compose() {
        let flags = RowFlags::CHECKED | RowFlags::VISIBLE;
        assert!(flags.contains(RowFlags::CHECKED));
        assert!(!flags.contains(RowFlags::DISABLED));
    }
}
