// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistent projection state owned by the hosting component.

use alloc::vec::Vec;
use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::NodeKey;

/// The key-indexed backing maps behind the four projections.
///
/// This is an explicit value owned by the hosting component, passed into
/// every [`TreeIndex::build`](crate::TreeIndex::build). Checked, expanded,
/// and disabled persist across builds and seed each rebuild, so toggling
/// state does not reset when the raw input changes shape. Searched is
/// cleared and refilled by every build pass.
///
/// Reads on [`TreeIndex`](crate::TreeIndex) take `&TreeState` and are pure;
/// the cascading writes (`set_checked`, `set_expanded`, …) take `&mut` and
/// go through the index so propagation can follow entry links.
#[derive(Clone, Debug, Default)]
pub struct TreeState {
    pub(crate) checked: HashMap<NodeKey, bool>,
    pub(crate) expanded: HashMap<NodeKey, bool>,
    pub(crate) disabled: HashMap<NodeKey, bool>,
    pub(crate) searched: HashMap<NodeKey, bool>,
}

impl TreeState {
    /// Creates empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded checked value for `key`, if any.
    #[must_use]
    pub fn checked(&self, key: &NodeKey) -> Option<bool> {
        self.checked.get(key).copied()
    }

    /// The recorded expansion value for `key`, if any.
    #[must_use]
    pub fn expanded(&self, key: &NodeKey) -> Option<bool> {
        self.expanded.get(key).copied()
    }

    /// The recorded disabled value for `key`, if any.
    #[must_use]
    pub fn disabled(&self, key: &NodeKey) -> Option<bool> {
        self.disabled.get(key).copied()
    }

    /// The recorded searched value for `key`, if any.
    #[must_use]
    pub fn searched(&self, key: &NodeKey) -> Option<bool> {
        self.searched.get(key).copied()
    }

    /// Records a checked value without any cascade.
    ///
    /// Interactive toggles should go through
    /// [`TreeIndex::set_checked`](crate::TreeIndex::set_checked) instead,
    /// which propagates along entry links.
    pub fn record_checked(&mut self, key: NodeKey, value: bool) {
        self.checked.insert(key, value);
    }

    /// Records an expansion value without any cascade.
    pub fn record_expanded(&mut self, key: NodeKey, value: bool) {
        self.expanded.insert(key, value);
    }

    /// Records a disabled value.
    pub fn record_disabled(&mut self, key: NodeKey, value: bool) {
        self.disabled.insert(key, value);
    }

    /// Applies explicit checked-map writes produced by a pure read.
    ///
    /// See [`TreeIndex::indeterminate`](crate::TreeIndex::indeterminate).
    pub fn apply<I>(&mut self, writes: I)
    where
        I: IntoIterator<Item = CheckWrite>,
    {
        for write in writes {
            self.checked.insert(write.key, write.checked);
        }
    }

    /// Drops everything, including persistent checked/expanded/disabled
    /// state.
    pub fn clear(&mut self) {
        self.checked.clear();
        self.expanded.clear();
        self.disabled.clear();
        self.searched.clear();
    }

    /// Flattens the persistent maps into a sorted, restorable snapshot.
    ///
    /// The searched map is derived per build and is not part of snapshots.
    #[must_use]
    pub fn snapshot(&self) -> TreeSnapshot {
        fn sorted(map: &HashMap<NodeKey, bool>) -> Vec<(NodeKey, bool)> {
            let mut pairs: Vec<(NodeKey, bool)> =
                map.iter().map(|(k, v)| (k.clone(), *v)).collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            pairs
        }
        TreeSnapshot {
            checked: sorted(&self.checked),
            expanded: sorted(&self.expanded),
            disabled: sorted(&self.disabled),
        }
    }

    /// Replaces the persistent maps with a snapshot's contents.
    pub fn restore(&mut self, snapshot: TreeSnapshot) {
        self.checked = snapshot.checked.into_iter().collect();
        self.expanded = snapshot.expanded.into_iter().collect();
        self.disabled = snapshot.disabled.into_iter().collect();
        self.searched.clear();
    }
}

/// One explicit write against the checked map.
///
/// The original engine mutated the checked map as a side effect of reading
/// indeterminacy; here the read returns these records and the caller applies
/// them with [`TreeState::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckWrite {
    /// Key to write.
    pub key: NodeKey,
    /// Value to record.
    pub checked: bool,
}

/// Sorted flattening of a [`TreeState`] for persistence or transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeSnapshot {
    /// Recorded checked values, sorted by key.
    pub checked: Vec<(NodeKey, bool)>,
    /// Recorded expansion values, sorted by key.
    pub expanded: Vec<(NodeKey, bool)>,
    /// Recorded disabled values, sorted by key.
    pub disabled: Vec<(NodeKey, bool)>,
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{CheckWrite, TreeState};
    use crate::types::NodeKey;

    #[test]
    fn snapshot_round_trips() {
        let mut state = TreeState::new();
        state.record_checked(NodeKey::from("b"), true);
        state.record_checked(NodeKey::from("a"), false);
        state.record_expanded(NodeKey::from("a"), true);
        state.record_disabled(NodeKey::from("c"), true);

        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.checked,
            vec![(NodeKey::from("a"), false), (NodeKey::from("b"), true)]
        );

        let mut restored = TreeState::new();
        restored.restore(snapshot);
        assert_eq!(restored.checked(&NodeKey::from("b")), Some(true));
        assert_eq!(restored.expanded(&NodeKey::from("a")), Some(true));
        assert_eq!(restored.disabled(&NodeKey::from("c")), Some(true));
    }

    #[test]
    fn apply_writes_updates_checked_map() {
        let mut state = TreeState::new();
        state.apply(vec![
            CheckWrite {
                key: NodeKey::from("x"),
                checked: true,
            },
            CheckWrite {
                key: NodeKey::from("y"),
                checked: false,
            },
        ]);
        assert_eq!(state.checked(&NodeKey::from("x")), Some(true));
        assert_eq!(state.checked(&NodeKey::from("y")), Some(false));
    }

    #[test]
    fn clear_drops_all_maps() {
        let mut state = TreeState::new();
        state.record_checked(NodeKey::from("a"), true);
        state.record_expanded(NodeKey::from("a"), true);
        state.clear();
        assert_eq!(state.checked(&NodeKey::from("a")), None);
        assert_eq!(state.expanded(&NodeKey::from("a")), None);
    }
}
