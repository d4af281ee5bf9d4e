// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committing a drop plan against the caller-owned raw tree.

use alloc::string::String;
use alloc::vec::Vec;

use arbor_index::{NodeKey, TreeNode, resolve_key};

use crate::{DropError, DropPlan, DropTarget};

/// Child-index path to the node carrying `key`.
///
/// Walks `roots` with the same key resolution as the index build, so a key
/// taken from a [`TreeIndex`](arbor_index::TreeIndex) built over the same
/// input (and the same `key_fn`) resolves to the same node. For duplicated
/// keys this finds the *first* match in pre-order; commit callers are
/// expected to feed unique keys.
#[must_use]
pub fn locate_key<N: TreeNode>(
    roots: &[N],
    key_fn: Option<&dyn Fn(&N) -> Option<String>>,
    key: &NodeKey,
) -> Option<Vec<usize>> {
    fn walk<N: TreeNode>(
        nodes: &[N],
        parent: Option<&NodeKey>,
        target: &NodeKey,
        key_fn: Option<&dyn Fn(&N) -> Option<String>>,
        path: &mut Vec<usize>,
    ) -> bool {
        for (position, node) in nodes.iter().enumerate() {
            let node_key = resolve_key(node, position, parent, key_fn);
            path.push(position);
            if node_key == *target {
                return true;
            }
            if walk(node.children(), Some(&node_key), target, key_fn, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    walk(roots, None, key, key_fn, &mut path).then_some(path)
}

/// Splices the planned source subtree into its target.
///
/// The source node is removed from its parent's child list (or the root
/// list) and appended to the target's children, or to `roots` for
/// [`DropTarget::Root`]. On any error the input is left untouched. The
/// caller re-runs the index build afterwards; nothing here updates derived
/// state.
pub fn commit_drop<N: TreeNode>(
    roots: &mut Vec<N>,
    key_fn: Option<&dyn Fn(&N) -> Option<String>>,
    plan: &DropPlan,
) -> Result<(), DropError> {
    let source_path = locate_key(roots, key_fn, &plan.source).ok_or(DropError::UnknownSource)?;
    let mut target_path = match &plan.target {
        DropTarget::Root => Vec::new(),
        DropTarget::Node(key) => locate_key(roots, key_fn, key).ok_or(DropError::UnknownTarget)?,
    };
    if target_path.starts_with(&source_path) {
        return Err(DropError::TargetInsideSource);
    }

    let node = remove_at(roots, &source_path).ok_or(DropError::UnknownSource)?;

    // Removing the source shifts its later siblings one position left;
    // patch the target path if it runs through that sibling list.
    let depth = source_path.len() - 1;
    if target_path.len() > depth
        && target_path[..depth] == source_path[..depth]
        && target_path[depth] > source_path[depth]
    {
        target_path[depth] -= 1;
    }

    let Some(list) = children_at_mut(roots, &target_path) else {
        // Unreachable for paths validated above; restore and report.
        if let Some(list) = children_at_mut(roots, &source_path[..depth]) {
            let position = source_path[depth].min(list.len());
            list.insert(position, node);
        }
        return Err(DropError::UnknownTarget);
    };
    list.push(node);
    Ok(())
}

fn remove_at<N: TreeNode>(roots: &mut Vec<N>, path: &[usize]) -> Option<N> {
    let (last, prefix) = path.split_last()?;
    let list = children_at_mut(roots, prefix)?;
    (*last < list.len()).then(|| list.remove(*last))
}

fn children_at_mut<'t, N: TreeNode>(
    roots: &'t mut Vec<N>,
    path: &[usize],
) -> Option<&'t mut Vec<N>> {
    let mut list = roots;
    for &position in path {
        list = list.get_mut(position)?.children_mut();
    }
    Some(list)
}
