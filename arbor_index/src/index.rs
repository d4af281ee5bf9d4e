// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree indexer: flat index build, lookups, visibility, row output.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::key::resolve_key;
use crate::node::TreeNode;
use crate::state::TreeState;
use crate::types::{EntryId, LeafHint, NodeKey, RowFlags};

/// Initial-expansion policy applied to keys with no recorded expansion state.
///
/// Recorded expansion always wins; the policy only decides what an unseen
/// key starts as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExpandPolicy {
    /// Only previously recorded expansion state applies.
    #[default]
    Recorded,
    /// Every unseen entry starts expanded.
    All,
    /// Unseen entries at depth `1..=n` start expanded; deeper keys stay
    /// unrecorded and read collapsed.
    Depth(usize),
}

/// Substring search over configured field paths.
///
/// Matching is case-sensitive. A node with no value at any configured path
/// does not match, and empty query text matches nothing.
#[derive(Copy, Clone, Debug)]
pub struct SearchQuery<'a> {
    /// Text to look for.
    pub text: &'a str,
    /// Field paths tested in order; any hit marks the node searched.
    pub fields: &'a [&'a [&'a str]],
}

/// Options for one index build.
pub struct BuildOptions<'a, N> {
    /// Caller key function; a non-empty result overrides the node's own
    /// key/id fields.
    pub key_fn: Option<&'a dyn Fn(&N) -> Option<String>>,
    /// Node filter; a rejected node is skipped together with its whole
    /// subtree.
    pub filter: Option<&'a dyn Fn(&N) -> bool>,
    /// Disabled predicate, combined with each node's own hint.
    pub is_disabled: Option<&'a dyn Fn(&N) -> bool>,
    /// Initial-expansion policy.
    pub expand: ExpandPolicy,
    /// Active search, if any.
    pub search: Option<SearchQuery<'a>>,
    /// Controlled checked keys. When present, the checked map is reset to
    /// exactly these (all `true`) before the walk.
    pub checked_keys: Option<&'a [NodeKey]>,
    /// Controlled expanded keys. When present, the expanded map is reset to
    /// exactly these (all `true`) before the walk.
    pub expanded_keys: Option<&'a [NodeKey]>,
}

impl<N> Default for BuildOptions<'_, N> {
    fn default() -> Self {
        Self {
            key_fn: None,
            filter: None,
            is_disabled: None,
            expand: ExpandPolicy::Recorded,
            search: None,
            checked_keys: None,
            expanded_keys: None,
        }
    }
}

impl<N> fmt::Debug for BuildOptions<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildOptions")
            .field("key_fn", &self.key_fn.is_some())
            .field("filter", &self.filter.is_some())
            .field("is_disabled", &self.is_disabled.is_some())
            .field("expand", &self.expand)
            .field("search", &self.search)
            .field("checked_keys", &self.checked_keys)
            .field("expanded_keys", &self.expanded_keys)
            .finish()
    }
}

/// One node's position in the flattened tree.
///
/// Entries are arena-stored and link to each other through [`EntryId`]s, so
/// parent back-references cannot form ownership cycles. Projected state is
/// not stored here; it is derived on read from the index plus a
/// [`TreeState`].
#[derive(Debug)]
pub struct IndexEntry<'a, N> {
    pub(crate) key: NodeKey,
    pub(crate) node: &'a N,
    pub(crate) parent: Option<EntryId>,
    pub(crate) children: SmallVec<[EntryId; 4]>,
    pub(crate) depth: usize,
    pub(crate) leaf: bool,
}

impl<'a, N> IndexEntry<'a, N> {
    /// The entry's stable key.
    #[must_use]
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// The raw node this entry was built from.
    #[must_use]
    pub fn node(&self) -> &'a N {
        self.node
    }

    /// The parent entry, or `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Ordered child entries.
    #[must_use]
    pub fn children(&self) -> &[EntryId] {
        &self.children
    }

    /// Depth in the tree; roots are depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the entry resolved as a leaf (hint, or no indexed children).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }
}

/// Renderer-facing snapshot of one entry.
#[derive(Debug)]
pub struct Row<'a, N> {
    /// Stable key.
    pub key: NodeKey,
    /// The raw node, for cell content.
    pub node: &'a N,
    /// Depth in the tree; roots are depth 1.
    pub depth: usize,
    /// Projected state at materialization time.
    pub flags: RowFlags,
    /// Number of indexed children.
    pub child_count: usize,
}

/// Flat, key-addressable index over one build of the raw tree.
///
/// `build` walks the caller's roots once, in pre-order, producing one
/// [`IndexEntry`] per accepted node. The index borrows the raw nodes; it is
/// rebuilt (and the previous value dropped) whenever the raw input or a
/// control prop changes. The persistent [`TreeState`] passed into the build
/// is what carries checked/expanded/disabled state across rebuilds.
///
/// Projection reads ([`is_checked`](Self::is_checked),
/// [`is_expanded`](Self::is_expanded), …) are pure functions of the index
/// and a `&TreeState`; cascading writes ([`set_checked`](Self::set_checked),
/// [`set_expanded`](Self::set_expanded)) take `&mut TreeState` and follow
/// entry links. See the crate docs for the propagation rules.
#[derive(Debug)]
pub struct TreeIndex<'a, N> {
    entries: Vec<IndexEntry<'a, N>>,
    by_key: HashMap<NodeKey, EntryId>,
    roots: SmallVec<[EntryId; 4]>,
}

impl<'a, N: TreeNode> TreeIndex<'a, N> {
    /// Builds a new index over `roots`.
    ///
    /// Recorded checked/expanded state in `state` seeds the build (unless
    /// overridden by controlled keys in `options`); the disabled and
    /// searched maps are recomputed from scratch. Keys duplicated across
    /// nodes are not an error: the last-built entry wins in the key lookup.
    pub fn build(
        roots: &'a [N],
        options: &BuildOptions<'_, N>,
        state: &mut TreeState,
    ) -> Self {
        let mut index = Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
            roots: SmallVec::new(),
        };

        if let Some(keys) = options.checked_keys {
            state.checked.clear();
            for key in keys {
                state.checked.insert(key.clone(), true);
            }
        }
        if let Some(keys) = options.expanded_keys {
            state.expanded.clear();
            for key in keys {
                state.expanded.insert(key.clone(), true);
            }
        }
        state.disabled.clear();
        state.searched.clear();

        for (position, root) in roots.iter().enumerate() {
            if let Some(id) = index.walk(root, position, None, 1, options, state) {
                index.roots.push(id);
            }
        }
        index
    }

    fn walk(
        &mut self,
        node: &'a N,
        position: usize,
        parent: Option<EntryId>,
        depth: usize,
        options: &BuildOptions<'_, N>,
        state: &mut TreeState,
    ) -> Option<EntryId> {
        if let Some(filter) = options.filter
            && !filter(node)
        {
            return None;
        }

        let parent_key = parent.map(|p| self.entries[p.idx()].key.clone());
        let key = resolve_key(node, position, parent_key.as_ref(), options.key_fn);

        // Reserve the arena slot before recursing: the flat list stays
        // pre-order while `children` completes after the subtree walk.
        let id = EntryId::new(self.entries.len());
        self.entries.push(IndexEntry {
            key: key.clone(),
            node,
            parent,
            children: SmallVec::new(),
            depth,
            leaf: false,
        });

        if !state.expanded.contains_key(&key) {
            match options.expand {
                ExpandPolicy::Recorded => {}
                ExpandPolicy::All => {
                    state.expanded.insert(key.clone(), true);
                }
                ExpandPolicy::Depth(limit) => {
                    if depth <= limit {
                        state.expanded.insert(key.clone(), true);
                    }
                }
            }
        }

        let mut disabled = node.disabled_hint();
        if let Some(is_disabled) = options.is_disabled {
            disabled |= is_disabled(node);
        }
        if disabled {
            state.disabled.insert(key.clone(), true);
        }

        if let Some(search) = &options.search
            && search_matches(node, search)
        {
            state.searched.insert(key.clone(), true);
        }

        let mut children: SmallVec<[EntryId; 4]> = SmallVec::new();
        for (child_position, child) in node.children().iter().enumerate() {
            if let Some(child_id) =
                self.walk(child, child_position, Some(id), depth + 1, options, state)
            {
                children.push(child_id);
            }
        }

        let leaf = match node.leaf_hint() {
            LeafHint::Leaf => true,
            LeafHint::Branch => false,
            LeafHint::Auto => children.is_empty(),
        };
        let entry = &mut self.entries[id.idx()];
        entry.children = children;
        entry.leaf = leaf;

        // Last-built entry wins for a duplicated key.
        self.by_key.insert(key, id);
        Some(id)
    }
}

fn search_matches<N: TreeNode>(node: &N, search: &SearchQuery<'_>) -> bool {
    if search.text.is_empty() {
        return false;
    }
    search
        .fields
        .iter()
        .any(|path| node.field(path).is_some_and(|value| value.contains(search.text)))
}

impl<'a, N> TreeIndex<'a, N> {
    /// Number of entries in the flat list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for `id`, or `None` for an out-of-range id.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&IndexEntry<'a, N>> {
        self.entries.get(id.idx())
    }

    /// Access an entry known to be in range; panics otherwise.
    pub(crate) fn entry(&self, id: EntryId) -> &IndexEntry<'a, N> {
        &self.entries[id.idx()]
    }

    /// Iterates the flat list in build (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &IndexEntry<'a, N>)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (EntryId::new(idx), entry))
    }

    /// Root entries in input order.
    #[must_use]
    pub fn roots(&self) -> &[EntryId] {
        &self.roots
    }

    /// Resolves a key to its entry.
    ///
    /// When a key was produced by more than one node in this build, this
    /// returns the last-built entry.
    #[must_use]
    pub fn entry_by_key(&self, key: &str) -> Option<EntryId> {
        self.by_key.get(key).copied()
    }

    /// The key of `id`, or `None` for an out-of-range id.
    #[must_use]
    pub fn key_of(&self, id: EntryId) -> Option<&NodeKey> {
        self.get(id).map(IndexEntry::key)
    }

    /// The parent of `id`, or `None` for roots and out-of-range ids.
    #[must_use]
    pub fn parent_of(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).and_then(IndexEntry::parent)
    }

    /// The children of `id`; empty for leaves and out-of-range ids.
    #[must_use]
    pub fn children_of(&self, id: EntryId) -> &[EntryId] {
        self.get(id).map_or(&[], IndexEntry::children)
    }

    /// Walks from `id`'s parent up to its root.
    #[must_use]
    pub fn ancestors(&self, id: EntryId) -> Ancestors<'_, 'a, N> {
        Ancestors {
            index: self,
            next: self.parent_of(id),
        }
    }

    /// Whether `id` is renderable: roots always are; any other entry is
    /// visible iff its parent is visible and expanded.
    #[must_use]
    pub fn is_visible(&self, id: EntryId, state: &TreeState) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        match entry.parent {
            None => true,
            Some(parent) => self.is_visible(parent, state) && self.is_expanded(parent, state),
        }
    }

    /// The ordered renderable subsequence of the flat list.
    #[must_use]
    pub fn visible(&self, state: &TreeState) -> Vec<EntryId> {
        self.visible_where(state, |_| true)
    }

    /// Like [`visible`](Self::visible), with an output predicate.
    ///
    /// The predicate filters the returned sequence only; an entry it hides
    /// still counts as visible for its descendants.
    #[must_use]
    pub fn visible_where<F>(&self, state: &TreeState, keep: F) -> Vec<EntryId>
    where
        F: Fn(&IndexEntry<'a, N>) -> bool,
    {
        let mut out = Vec::new();
        let mut shown = alloc::vec![false; self.entries.len()];
        for (idx, entry) in self.entries.iter().enumerate() {
            let show = match entry.parent {
                None => true,
                Some(parent) => shown[parent.idx()] && self.is_expanded(parent, state),
            };
            shown[idx] = show;
            if show && keep(entry) {
                out.push(EntryId::new(idx));
            }
        }
        out
    }

    /// Ancestor keys of searched entries, root-to-leaf, deduplicated.
    ///
    /// Search marks matched nodes only; nothing expands automatically.
    /// Consumers force-expand these keys (for example by recording them as
    /// expanded before the next read) to reveal every match.
    #[must_use]
    pub fn expansion_keys_for_matches(&self, state: &TreeState) -> Vec<NodeKey> {
        let mut seen: HashSet<NodeKey> = HashSet::new();
        let mut out = Vec::new();
        for (id, _) in self.iter() {
            if !self.is_searched(id, state) {
                continue;
            }
            let mut path: SmallVec<[EntryId; 8]> = self.ancestors(id).collect();
            path.reverse();
            for ancestor in path {
                let key = &self.entry(ancestor).key;
                if seen.insert(key.clone()) {
                    out.push(key.clone());
                }
            }
        }
        out
    }

    /// Materializes `id` for rendering.
    ///
    /// Resolves indeterminacy first — applying any forced checked-map writes
    /// (see [`indeterminate`](Self::indeterminate)) — so a row can never
    /// read both checked and indeterminate.
    #[must_use]
    pub fn row(&self, id: EntryId, state: &mut TreeState) -> Option<Row<'a, N>> {
        let entry = self.get(id)?;
        let mut flags = RowFlags::empty();
        if self.resolve_indeterminate(id, state) {
            flags |= RowFlags::INDETERMINATE;
        }
        if self.is_checked(id, state) {
            flags |= RowFlags::CHECKED;
        }
        if self.is_expanded(id, state) {
            flags |= RowFlags::EXPANDED;
        }
        if self.is_disabled(id, state) {
            flags |= RowFlags::DISABLED;
        }
        if self.is_searched(id, state) {
            flags |= RowFlags::SEARCHED;
        }
        if self.is_visible(id, state) {
            flags |= RowFlags::VISIBLE;
        }
        if entry.leaf {
            flags |= RowFlags::LEAF;
        }
        Some(Row {
            key: entry.key.clone(),
            node: entry.node,
            depth: entry.depth,
            flags,
            child_count: entry.children.len(),
        })
    }
}

/// Iterator from an entry's parent up to its root.
#[derive(Debug)]
pub struct Ancestors<'i, 'a, N> {
    index: &'i TreeIndex<'a, N>,
    next: Option<EntryId>,
}

impl<N> Iterator for Ancestors<'_, '_, N> {
    type Item = EntryId;

    fn next(&mut self) -> Option<EntryId> {
        let current = self.next?;
        self.next = self.index.parent_of(current);
        Some(current)
    }
}
