// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Reorder: drag target resolution and raw-tree splicing.
//!
//! Drag-and-drop over an indexed tree splits into three small contracts:
//!
//! - a caller-supplied **policy** decides legality per hover:
//!   `Fn(source, hovered) -> Option<DropTarget>`, where `None` means the
//!   drop is illegal, [`DropTarget::Root`] is the synthetic top-level
//!   target, and [`DropTarget::Node`] may name a different entry than the
//!   hovered one (for example redirecting a drop on a disabled node up to
//!   its nearest enabled ancestor — see [`nearest_enabled`]);
//! - [`DragState`] tracks one drag session across the start/over/drop
//!   callbacks and turns a legal release into a [`DropPlan`];
//! - [`commit_drop`] applies a plan to the caller-owned raw tree, splicing
//!   the source subtree out of its parent's child list and appending it to
//!   the target's. The index is *not* updated here: the caller re-runs the
//!   indexer afterwards (bumping its rebuild revision), exactly as for any
//!   other raw-input mutation.
//!
//! Unknown keys never panic: they surface as [`DropError`] and leave the
//! raw tree untouched, as does releasing a drop into the dragged node's own
//! subtree.
//!
//! ```rust
//! use arbor_index::{BuildOptions, NodeKey, SimpleNode, TreeIndex, TreeState};
//! use arbor_reorder::{DragState, DropTarget, commit_drop};
//!
//! let mut roots = vec![
//!     SimpleNode::new("a").with_children(vec![SimpleNode::new("a1")]),
//!     SimpleNode::new("b"),
//! ];
//!
//! // Anything may drop anywhere, onto exactly the hovered node.
//! let policy = |_: &NodeKey, hovered: Option<&NodeKey>| {
//!     hovered.cloned().map(DropTarget::Node)
//! };
//!
//! let mut drag = DragState::new();
//! drag.start(NodeKey::from("a1"));
//! let hovered = NodeKey::from("b");
//! drag.over(Some(&hovered), &policy);
//! let plan = drag.finish().unwrap();
//!
//! commit_drop(&mut roots, None, &plan).unwrap();
//! assert!(roots[0].children.is_empty());
//! assert_eq!(roots[1].children[0].id, "a1");
//!
//! // The caller rebuilds the index against the mutated input.
//! let mut state = TreeState::new();
//! let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);
//! let a1 = index.entry_by_key("a1").unwrap();
//! assert_eq!(index.key_of(index.parent_of(a1).unwrap()).unwrap().as_str(), "b");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod splice;

pub use splice::{commit_drop, locate_key};

use core::fmt;

use arbor_index::{NodeKey, TreeIndex, TreeState};

/// Where a legal drop lands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop into the top-level root list.
    Root,
    /// Drop into the children of the named node.
    Node(NodeKey),
}

/// Why a drop could not be committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropError {
    /// The plan's source key resolved to no node in the raw tree.
    UnknownSource,
    /// The plan's target key resolved to no node in the raw tree.
    UnknownTarget,
    /// The target lies inside the dragged subtree (or is the source
    /// itself); committing would orphan the subtree.
    TargetInsideSource,
}

impl fmt::Display for DropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSource => f.write_str("drop source key not found in the raw tree"),
            Self::UnknownTarget => f.write_str("drop target key not found in the raw tree"),
            Self::TargetInsideSource => {
                f.write_str("drop target lies inside the dragged subtree")
            }
        }
    }
}

impl core::error::Error for DropError {}

/// A resolved, committable relocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropPlan {
    /// Key of the dragged node.
    pub source: NodeKey,
    /// Where it lands.
    pub target: DropTarget,
}

/// Tracks one drag session across the start/over/drop callbacks.
///
/// The session is keyed by [`NodeKey`] so it stays valid across index
/// rebuilds that happen mid-drag. An illegal hover clears the resolved
/// target, so releasing over it is a no-op.
#[derive(Clone, Debug, Default)]
pub struct DragState {
    source: Option<NodeKey>,
    target: Option<DropTarget>,
}

impl DragState {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins dragging `source`, discarding any previous session.
    pub fn start(&mut self, source: NodeKey) {
        self.source = Some(source);
        self.target = None;
    }

    /// The dragged key, if a session is active.
    #[must_use]
    pub fn source(&self) -> Option<&NodeKey> {
        self.source.as_ref()
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    /// Re-evaluates the hovered entry against the caller's policy and
    /// stores the verdict. Returns the resolved target, `None` when the
    /// hover is illegal or no session is active.
    pub fn over(
        &mut self,
        hovered: Option<&NodeKey>,
        policy: &dyn Fn(&NodeKey, Option<&NodeKey>) -> Option<DropTarget>,
    ) -> Option<&DropTarget> {
        let source = self.source.as_ref()?;
        self.target = policy(source, hovered);
        self.target.as_ref()
    }

    /// The currently resolved target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    /// Ends the session. A session with a resolved target yields a plan;
    /// anything else is a no-op returning `None`.
    pub fn finish(&mut self) -> Option<DropPlan> {
        let source = self.source.take();
        let target = self.target.take();
        Some(DropPlan {
            source: source?,
            target: target?,
        })
    }

    /// Abandons the session without producing a plan.
    pub fn cancel(&mut self) {
        self.source = None;
        self.target = None;
    }
}

/// Resolves `hovered` to itself or its nearest enabled ancestor.
///
/// The common redirect policy: a drop aimed at a disabled entry walks up
/// until an enabled ancestor accepts it; a fully disabled root chain
/// redirects to [`DropTarget::Root`]. Returns `None` when `hovered` is not
/// in the index.
#[must_use]
pub fn nearest_enabled<N>(
    index: &TreeIndex<'_, N>,
    state: &TreeState,
    hovered: &NodeKey,
) -> Option<DropTarget> {
    let mut current = index.entry_by_key(hovered.as_str())?;
    loop {
        if !index.is_disabled(current, state) {
            return index.key_of(current).cloned().map(DropTarget::Node);
        }
        match index.parent_of(current) {
            Some(parent) => current = parent,
            None => return Some(DropTarget::Root),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use arbor_index::{BuildOptions, NodeKey, SimpleNode, TreeIndex, TreeState};

    use super::{DragState, DropTarget, nearest_enabled};

    #[test]
    fn session_produces_a_plan_for_a_legal_hover() {
        let mut drag = DragState::new();
        assert!(!drag.is_dragging());
        assert!(drag.finish().is_none());

        drag.start(NodeKey::from("x"));
        assert!(drag.is_dragging());

        let policy = |_: &NodeKey, hovered: Option<&NodeKey>| {
            hovered.cloned().map(DropTarget::Node)
        };
        let hovered = NodeKey::from("y");
        assert_eq!(
            drag.over(Some(&hovered), &policy),
            Some(&DropTarget::Node(NodeKey::from("y")))
        );

        let plan = drag.finish().unwrap();
        assert_eq!(plan.source, NodeKey::from("x"));
        assert_eq!(plan.target, DropTarget::Node(NodeKey::from("y")));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn illegal_hover_clears_the_target() {
        let mut drag = DragState::new();
        drag.start(NodeKey::from("x"));

        let allow = |_: &NodeKey, hovered: Option<&NodeKey>| {
            hovered.cloned().map(DropTarget::Node)
        };
        let deny = |_: &NodeKey, _: Option<&NodeKey>| None;

        let hovered = NodeKey::from("y");
        drag.over(Some(&hovered), &allow);
        assert!(drag.target().is_some());

        // Moving onto an illegal entry forgets the previous verdict.
        drag.over(Some(&hovered), &deny);
        assert!(drag.target().is_none());
        assert!(drag.finish().is_none());
    }

    #[test]
    fn cancel_abandons_the_session() {
        let mut drag = DragState::new();
        drag.start(NodeKey::from("x"));
        drag.cancel();
        assert!(!drag.is_dragging());
        assert!(drag.finish().is_none());
    }

    #[test]
    fn nearest_enabled_walks_past_disabled_entries() {
        let roots = vec![SimpleNode::new("a").with_children(vec![
            SimpleNode::new("off")
                .with_disabled(true)
                .with_children(vec![SimpleNode::new("off-leaf")]),
        ])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        // The leaf inherits disabled, so both hops land on "a".
        assert_eq!(
            nearest_enabled(&index, &state, &NodeKey::from("off-leaf")),
            Some(DropTarget::Node(NodeKey::from("a")))
        );
        assert_eq!(
            nearest_enabled(&index, &state, &NodeKey::from("off")),
            Some(DropTarget::Node(NodeKey::from("a")))
        );
        assert_eq!(nearest_enabled(&index, &state, &NodeKey::from("nope")), None);
    }

    #[test]
    fn nearest_enabled_falls_back_to_root() {
        let roots = vec![SimpleNode::new("a")
            .with_disabled(true)
            .with_children(vec![SimpleNode::new("a1")])];
        let mut state = TreeState::new();
        let index = TreeIndex::build(&roots, &BuildOptions::default(), &mut state);

        assert_eq!(
            nearest_enabled(&index, &state, &NodeKey::from("a1")),
            Some(DropTarget::Root)
        );
    }
}
