// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key derivation for raw nodes.

use alloc::format;
use alloc::string::{String, ToString};

use crate::node::TreeNode;
use crate::types::NodeKey;

/// Derives the stable key for `node` at child position `position`.
///
/// Resolution order:
/// 1. the caller-supplied key function, when it returns non-empty text,
/// 2. the node's own explicit key field,
/// 3. the node's id field,
/// 4. `{parent}-{position}` when the parent's key is known,
/// 5. the bare position.
///
/// Duplicate keys are not detected here; the key-indexed map on
/// [`TreeIndex`](crate::TreeIndex) keeps the last entry built for a key.
pub fn resolve_key<N: TreeNode>(
    node: &N,
    position: usize,
    parent: Option<&NodeKey>,
    key_fn: Option<&dyn Fn(&N) -> Option<String>>,
) -> NodeKey {
    if let Some(key_fn) = key_fn
        && let Some(key) = key_fn(node)
        && !key.is_empty()
    {
        return NodeKey::from(key);
    }
    if let Some(key) = node.key()
        && !key.is_empty()
    {
        return NodeKey::from(key);
    }
    if let Some(id) = node.id()
        && !id.is_empty()
    {
        return NodeKey::from(id);
    }
    match parent {
        Some(parent) => NodeKey::from(format!("{parent}-{position}")),
        None => NodeKey::from(position.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::resolve_key;
    use crate::node::TreeNode;
    use crate::types::NodeKey;

    struct Anonymous {
        children: Vec<Anonymous>,
    }

    impl TreeNode for Anonymous {
        fn children(&self) -> &[Self] {
            &self.children
        }

        fn children_mut(&mut self) -> &mut Vec<Self> {
            &mut self.children
        }
    }

    struct Keyed {
        key: String,
        id: String,
        children: Vec<Keyed>,
    }

    impl TreeNode for Keyed {
        fn key(&self) -> Option<&str> {
            (!self.key.is_empty()).then_some(self.key.as_str())
        }

        fn id(&self) -> Option<&str> {
            (!self.id.is_empty()).then_some(self.id.as_str())
        }

        fn children(&self) -> &[Self] {
            &self.children
        }

        fn children_mut(&mut self) -> &mut Vec<Self> {
            &mut self.children
        }
    }

    #[test]
    fn key_function_wins_when_non_empty() {
        let node = Keyed {
            key: "explicit".to_string(),
            id: "id".to_string(),
            children: Vec::new(),
        };
        let key_fn = |n: &Keyed| Some(alloc::format!("fn:{}", n.id));
        assert_eq!(
            resolve_key(&node, 0, None, Some(&key_fn)),
            NodeKey::from("fn:id")
        );

        // An empty result falls through to the node's own fields.
        let empty_fn = |_: &Keyed| Some(String::new());
        assert_eq!(
            resolve_key(&node, 0, None, Some(&empty_fn)),
            NodeKey::from("explicit")
        );
    }

    #[test]
    fn key_field_beats_id_field() {
        let node = Keyed {
            key: "k".to_string(),
            id: "i".to_string(),
            children: Vec::new(),
        };
        assert_eq!(resolve_key(&node, 0, None, None), NodeKey::from("k"));

        let node = Keyed {
            key: String::new(),
            id: "i".to_string(),
            children: Vec::new(),
        };
        assert_eq!(resolve_key(&node, 0, None, None), NodeKey::from("i"));
    }

    #[test]
    fn positional_fallbacks() {
        let node = Anonymous {
            children: Vec::new(),
        };
        assert_eq!(resolve_key(&node, 3, None, None), NodeKey::from("3"));

        let parent = NodeKey::from("p");
        assert_eq!(
            resolve_key(&node, 3, Some(&parent), None),
            NodeKey::from("p-3")
        );
    }
}
