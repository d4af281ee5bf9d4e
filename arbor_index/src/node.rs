// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The caller-owned raw node contract.

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::LeafHint;

/// A caller-owned hierarchical record fed into the index build.
///
/// The engine never stores these records: [`TreeIndex`](crate::TreeIndex)
/// borrows them for the lifetime of one build, and the only mutation the
/// engine ever performs is the drag-commit splice through
/// [`children_mut`](TreeNode::children_mut).
///
/// Everything except children access is optional and defaulted: a record
/// with no key or id fields still indexes, falling back to positional keys
/// (see [`resolve_key`](crate::resolve_key)).
///
/// Because children are an owned, ordered sequence, cyclic input is not
/// representable; the indexer walks without a visited set.
pub trait TreeNode: Sized {
    /// Explicit key field, if the record carries one.
    fn key(&self) -> Option<&str> {
        None
    }

    /// Identifier field, used when no explicit key is present.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Ordered child records.
    fn children(&self) -> &[Self];

    /// Mutable access to the ordered child records.
    ///
    /// Only the drag-commit path uses this; reads go through
    /// [`children`](TreeNode::children).
    fn children_mut(&mut self) -> &mut Vec<Self>;

    /// How this record describes its own leaf-ness.
    fn leaf_hint(&self) -> LeafHint {
        LeafHint::Auto
    }

    /// Whether this record marks itself disabled, independent of any
    /// build-time disabled predicate.
    fn disabled_hint(&self) -> bool {
        false
    }

    /// Looks up a searchable text field by path.
    ///
    /// `path` is one field path from the build's search configuration. An
    /// absent field is a non-match, never an error.
    fn field(&self, path: &[&str]) -> Option<&str> {
        let _ = path;
        None
    }
}

/// Minimal owned [`TreeNode`] implementation.
///
/// Suitable for demos, tests, and hosts that have no record type of their
/// own: an id (which doubles as the derived key), a display label reachable
/// through the `["label"]` field path, children, and a disabled flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleNode {
    /// Identifier; becomes the node key.
    pub id: String,
    /// Display label; searchable via the `["label"]` field path.
    pub label: String,
    /// Ordered child nodes.
    pub children: Vec<SimpleNode>,
    /// Disabled hint.
    pub disabled: bool,
}

impl SimpleNode {
    /// Creates a node whose label equals its id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: String::from(id),
            label: String::from(id),
            children: Vec::new(),
            disabled: false,
        }
    }

    /// Creates a node with a distinct display label.
    #[must_use]
    pub fn labeled(id: &str, label: &str) -> Self {
        Self {
            label: String::from(label),
            ..Self::new(id)
        }
    }

    /// Replaces the child list.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SimpleNode>) -> Self {
        self.children = children;
        self
    }

    /// Sets the disabled hint.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl TreeNode for SimpleNode {
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }

    fn disabled_hint(&self) -> bool {
        self.disabled
    }

    fn field(&self, path: &[&str]) -> Option<&str> {
        match path {
            ["label"] => Some(&self.label),
            ["id"] => Some(&self.id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SimpleNode, TreeNode};

    #[test]
    fn simple_node_exposes_fields_by_path() {
        let node = SimpleNode::labeled("n1", "First");
        assert_eq!(node.field(&["label"]), Some("First"));
        assert_eq!(node.field(&["id"]), Some("n1"));
        assert_eq!(node.field(&["missing"]), None);
    }

    #[test]
    fn builder_sets_children_and_disabled() {
        let node = SimpleNode::new("root")
            .with_children(alloc::vec![SimpleNode::new("child")])
            .with_disabled(true);
        assert_eq!(node.children().len(), 1);
        assert!(node.disabled_hint());
    }
}
