// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four projections over the index: checked, expanded, disabled,
//! searched.
//!
//! Each projection is a view over one of the [`TreeState`] maps with its own
//! propagation rule:
//!
//! - **checked** cascades down onto enabled descendants on write, is
//!   inherited from checked ancestors on read, and recomputes from children
//!   otherwise; un-checking clears every ancestor's stored value.
//! - **expanded** never propagates implicitly; an explicit collapse records
//!   `false` on every descendant.
//! - **disabled** is inherited from ancestors on read, not on write.
//! - **searched** is set per node by the build pass and never cascaded;
//!   ancestor auto-expansion is the separate
//!   [`expansion_keys_for_matches`](TreeIndex::expansion_keys_for_matches).
//!
//! Reads are pure. The one read the original engine made effectful —
//! indeterminacy forcing the node's own checked value — returns its writes
//! explicitly here (see [`TreeIndex::indeterminate`]).

use smallvec::SmallVec;

use crate::index::TreeIndex;
use crate::state::{CheckWrite, TreeState};
use crate::types::EntryId;

impl<'a, N> TreeIndex<'a, N> {
    // --- checked ---

    /// Derived checked state for `id`.
    ///
    /// A stored `true` wins outright. Otherwise a disabled entry reads
    /// `false`; an enabled entry inherits `true` from any ancestor with a
    /// stored `true`, and failing that recomputes from its children via
    /// [`check_every`](Self::check_every). An entry with no children reads
    /// `false`.
    #[must_use]
    pub fn is_checked(&self, id: EntryId, state: &TreeState) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        if stored(state, self, id) {
            return true;
        }
        if self.is_disabled(id, state) {
            return false;
        }
        if self.ancestors(id).any(|a| stored(state, self, a)) {
            return true;
        }
        if entry.children.is_empty() {
            false
        } else {
            self.check_every(&entry.children, state, false)
        }
    }

    /// True iff every entry in `ids` is checked, recursing into children.
    ///
    /// An empty `ids` reads as `base`: a leaf set contributes `false`, while
    /// call sites that treat "nothing to check" as satisfied pass `true`.
    #[must_use]
    pub fn check_every(&self, ids: &[EntryId], state: &TreeState, base: bool) -> bool {
        if ids.is_empty() {
            return base;
        }
        ids.iter().all(|&id| {
            let entry = self.entry(id);
            if stored(state, self, id) {
                true
            } else if entry.children.is_empty() {
                false
            } else {
                self.check_every(&entry.children, state, false)
            }
        })
    }

    /// True iff any entry in `ids`, or any of its descendants, is checked.
    #[must_use]
    pub fn check_some(&self, ids: &[EntryId], state: &TreeState) -> bool {
        ids.iter().any(|&id| {
            stored(state, self, id) || self.check_some(&self.entry(id).children, state)
        })
    }

    /// Pure indeterminacy read: some but not all descendants checked.
    ///
    /// Returns the value together with the checked-map writes the original
    /// accessor applied implicitly: a `true` result forces the entry's own
    /// stored value to `false`, and a fully checked child set forces it to
    /// `true`. Apply the writes with [`TreeState::apply`], or use
    /// [`resolve_indeterminate`](Self::resolve_indeterminate).
    ///
    /// An entry with no children is never indeterminate.
    #[must_use]
    pub fn indeterminate(
        &self,
        id: EntryId,
        state: &TreeState,
    ) -> (bool, SmallVec<[CheckWrite; 1]>) {
        let mut writes = SmallVec::new();
        let Some(entry) = self.get(id) else {
            return (false, writes);
        };
        if entry.children.is_empty() {
            return (false, writes);
        }
        let some = self.check_some(&entry.children, state);
        let every = self.check_every(&entry.children, state, false);
        let value = some && !every;
        if value {
            if stored(state, self, id) {
                writes.push(CheckWrite {
                    key: entry.key.clone(),
                    checked: false,
                });
            }
        } else if every && !stored(state, self, id) {
            writes.push(CheckWrite {
                key: entry.key.clone(),
                checked: true,
            });
        }
        (value, writes)
    }

    /// Applies the forced writes from [`indeterminate`](Self::indeterminate)
    /// and returns the value.
    pub fn resolve_indeterminate(&self, id: EntryId, state: &mut TreeState) -> bool {
        let (value, writes) = self.indeterminate(id, state);
        state.apply(writes);
        value
    }

    /// Records `checked` for `id` and cascades.
    ///
    /// The same value is written onto every enabled descendant; a disabled
    /// entry freezes its whole subtree. Un-checking additionally clears
    /// every ancestor's stored value so they recompute from children on the
    /// next read.
    pub fn set_checked(&self, id: EntryId, checked: bool, state: &mut TreeState) {
        let Some(entry) = self.get(id) else {
            return;
        };
        state.checked.insert(entry.key.clone(), checked);
        if !self.is_disabled(id, state) {
            self.cascade_checked(&entry.children, checked, state);
        }
        if !checked {
            for ancestor in self.ancestors(id) {
                state
                    .checked
                    .insert(self.entry(ancestor).key.clone(), false);
            }
        }
    }

    fn cascade_checked(&self, ids: &[EntryId], checked: bool, state: &mut TreeState) {
        for &id in ids {
            let entry = self.entry(id);
            // A stored disabled flag freezes the subtree below it; the
            // inherited case was pruned one level up.
            if state.disabled.get(&entry.key).copied().unwrap_or(false) {
                continue;
            }
            state.checked.insert(entry.key.clone(), checked);
            self.cascade_checked(&entry.children, checked, state);
        }
    }

    // --- expanded ---

    /// Derived expansion state; unrecorded keys read collapsed.
    #[must_use]
    pub fn is_expanded(&self, id: EntryId, state: &TreeState) -> bool {
        self.get(id)
            .is_some_and(|entry| state.expanded.get(&entry.key).copied().unwrap_or(false))
    }

    /// Records expansion for `id`.
    ///
    /// Expanding touches no other entry. Collapsing records `false` on every
    /// descendant as well, so a later re-expand reveals one level at a time.
    /// Initial builds never collapse this way; only explicit writes do.
    pub fn set_expanded(&self, id: EntryId, expanded: bool, state: &mut TreeState) {
        let Some(entry) = self.get(id) else {
            return;
        };
        state.expanded.insert(entry.key.clone(), expanded);
        if !expanded {
            self.collapse_descendants(&entry.children, state);
        }
    }

    fn collapse_descendants(&self, ids: &[EntryId], state: &mut TreeState) {
        for &id in ids {
            let entry = self.entry(id);
            state.expanded.insert(entry.key.clone(), false);
            self.collapse_descendants(&entry.children, state);
        }
    }

    // --- disabled ---

    /// Derived disabled state; `true` if recorded for `id` or any ancestor.
    #[must_use]
    pub fn is_disabled(&self, id: EntryId, state: &TreeState) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        if state.disabled.get(&entry.key).copied().unwrap_or(false) {
            return true;
        }
        self.ancestors(id)
            .any(|a| state.disabled.get(&self.entry(a).key).copied().unwrap_or(false))
    }

    /// Records a disabled override for `id`; descendants inherit on read,
    /// so nothing cascades here.
    pub fn set_disabled(&self, id: EntryId, disabled: bool, state: &mut TreeState) {
        if let Some(entry) = self.get(id) {
            state.disabled.insert(entry.key.clone(), disabled);
        }
    }

    // --- searched ---

    /// Whether the build pass marked `id` as matching the search query.
    #[must_use]
    pub fn is_searched(&self, id: EntryId, state: &TreeState) -> bool {
        self.get(id)
            .is_some_and(|entry| state.searched.get(&entry.key).copied().unwrap_or(false))
    }

    /// Overrides the searched mark for `id`; never cascaded.
    pub fn set_searched(&self, id: EntryId, searched: bool, state: &mut TreeState) {
        if let Some(entry) = self.get(id) {
            state.searched.insert(entry.key.clone(), searched);
        }
    }
}

fn stored<N>(state: &TreeState, index: &TreeIndex<'_, N>, id: EntryId) -> bool {
    index
        .get(id)
        .is_some_and(|entry| state.checked.get(entry.key()).copied().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::index::{BuildOptions, TreeIndex};
    use crate::node::SimpleNode;
    use crate::state::TreeState;
    use crate::types::{NodeKey, RowFlags};

    fn n(id: &str, children: Vec<SimpleNode>) -> SimpleNode {
        SimpleNode::new(id).with_children(children)
    }

    /// a ─ a1, a2
    fn two_leaves() -> Vec<SimpleNode> {
        vec![n("a", vec![n("a1", vec![]), n("a2", vec![])])]
    }

    #[test]
    fn checking_a_parent_checks_every_enabled_descendant() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();
        index.set_checked(a, true, &mut state);

        let a1 = index.entry_by_key("a1").unwrap();
        let a2 = index.entry_by_key("a2").unwrap();
        assert!(index.is_checked(a1, &state));
        assert!(index.is_checked(a2, &state));
        assert!(!index.resolve_indeterminate(a, &mut state));
    }

    #[test]
    fn checking_one_child_makes_the_parent_indeterminate() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a1 = index.entry_by_key("a1").unwrap();
        index.set_checked(a1, true, &mut state);

        let a = index.entry_by_key("a").unwrap();
        assert!(index.resolve_indeterminate(a, &mut state));
        assert!(!index.is_checked(a, &state));
    }

    #[test]
    fn checking_all_children_checks_the_parent() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a1 = index.entry_by_key("a1").unwrap();
        let a2 = index.entry_by_key("a2").unwrap();
        index.set_checked(a1, true, &mut state);
        index.set_checked(a2, true, &mut state);

        let a = index.entry_by_key("a").unwrap();
        assert!(index.is_checked(a, &state));
        assert!(!index.resolve_indeterminate(a, &mut state));
        // The resolved read also forced the stored value.
        assert_eq!(state.checked(&NodeKey::from("a")), Some(true));
    }

    #[test]
    fn unchecking_clears_ancestor_stored_values() {
        // r -> a -> a1, a2
        let roots = vec![n("r", vec![n("a", vec![n("a1", vec![]), n("a2", vec![])])])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let r = index.entry_by_key("r").unwrap();
        index.set_checked(r, true, &mut state);
        let a1 = index.entry_by_key("a1").unwrap();
        index.set_checked(a1, false, &mut state);

        // Ancestors fall back to recomputation: some-but-not-all checked.
        let a = index.entry_by_key("a").unwrap();
        assert_eq!(state.checked(&NodeKey::from("a")), Some(false));
        assert_eq!(state.checked(&NodeKey::from("r")), Some(false));
        assert!(index.resolve_indeterminate(a, &mut state));
        assert!(index.resolve_indeterminate(r, &mut state));
        assert!(!index.is_checked(a1, &state));
        let a2 = index.entry_by_key("a2").unwrap();
        assert!(index.is_checked(a2, &state));
    }

    #[test]
    fn cascade_skips_disabled_subtrees() {
        let roots = vec![n(
            "a",
            vec![
                n("on", vec![]),
                SimpleNode::new("off")
                    .with_disabled(true)
                    .with_children(vec![n("off-child", vec![])]),
            ],
        )];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();
        index.set_checked(a, true, &mut state);

        assert!(index.is_checked(index.entry_by_key("on").unwrap(), &state));
        let off = index.entry_by_key("off").unwrap();
        let off_child = index.entry_by_key("off-child").unwrap();
        assert!(!index.is_checked(off, &state));
        assert_eq!(state.checked(&NodeKey::from("off")), None);
        assert_eq!(state.checked(&NodeKey::from("off-child")), None);
        assert!(!index.is_checked(off_child, &state));
    }

    #[test]
    fn checked_inherits_from_checked_ancestors_on_read() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        // A raw recorded value (no cascade) still reaches descendants on read.
        state.record_checked(NodeKey::from("a"), true);
        let a1 = index.entry_by_key("a1").unwrap();
        assert!(index.is_checked(a1, &state));
    }

    #[test]
    fn disabled_inherits_to_every_descendant_on_read() {
        let roots = vec![SimpleNode::new("a")
            .with_disabled(true)
            .with_children(vec![n("a1", vec![n("a1x", vec![])])])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a1 = index.entry_by_key("a1").unwrap();
        let a1x = index.entry_by_key("a1x").unwrap();
        assert!(index.is_disabled(a1, &state));
        assert!(index.is_disabled(a1x, &state));
        // The stored map only holds the origin; inheritance is read-side.
        assert_eq!(state.disabled(&NodeKey::from("a1x")), None);
    }

    #[test]
    fn collapsing_records_false_on_every_descendant() {
        let roots = vec![n("a", vec![n("a1", vec![n("a1x", vec![])])])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();
        let a1 = index.entry_by_key("a1").unwrap();
        index.set_expanded(a, true, &mut state);
        index.set_expanded(a1, true, &mut state);

        index.set_expanded(a, false, &mut state);
        assert!(!index.is_expanded(a1, &state));
        assert_eq!(state.expanded(&NodeKey::from("a1x")), Some(false));

        // Re-expanding the root reveals only one level.
        index.set_expanded(a, true, &mut state);
        assert!(!index.is_expanded(a1, &state));
    }

    #[test]
    fn expanding_does_not_cascade() {
        let roots = vec![n("a", vec![n("a1", vec![n("a1x", vec![])])])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();
        index.set_expanded(a, true, &mut state);
        let a1 = index.entry_by_key("a1").unwrap();
        assert!(!index.is_expanded(a1, &state));
    }

    #[test]
    fn indeterminate_returns_explicit_writes() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();

        // Force a stored true on the parent, then uncheck one child by hand:
        // the pure read reports the forced write without applying it.
        state.record_checked(NodeKey::from("a"), true);
        state.record_checked(NodeKey::from("a1"), true);
        state.record_checked(NodeKey::from("a2"), false);

        let (value, writes) = index.indeterminate(a, &state);
        assert!(value);
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].key, NodeKey::from("a"));
        assert!(!writes[0].checked);
        // Not applied yet.
        assert_eq!(state.checked(&NodeKey::from("a")), Some(true));
        state.apply(writes);
        assert_eq!(state.checked(&NodeKey::from("a")), Some(false));
    }

    #[test]
    fn leaves_are_never_indeterminate() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);
        let a1 = index.entry_by_key("a1").unwrap();
        state.record_checked(NodeKey::from("a1"), true);
        let (value, writes) = index.indeterminate(a1, &state);
        assert!(!value);
        assert!(writes.is_empty());
    }

    #[test]
    fn row_reports_flags_after_resolution() {
        let roots = two_leaves();
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        let a = index.entry_by_key("a").unwrap();
        let a1 = index.entry_by_key("a1").unwrap();
        index.set_expanded(a, true, &mut state);
        index.set_checked(a1, true, &mut state);

        let row = index.row(a, &mut state).unwrap();
        assert!(row.flags.contains(RowFlags::INDETERMINATE));
        assert!(!row.flags.contains(RowFlags::CHECKED));
        assert!(row.flags.contains(RowFlags::EXPANDED | RowFlags::VISIBLE));
        assert_eq!(row.child_count, 2);

        let leaf_row = index.row(a1, &mut state).unwrap();
        assert!(leaf_row.flags.contains(RowFlags::CHECKED | RowFlags::LEAF));
        assert_eq!(leaf_row.depth, 2);
    }
}
