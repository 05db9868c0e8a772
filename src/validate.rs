//! Sibling key contract checking.
//!
//! Every sibling sequence must be either all keyed or all unkeyed, and keys
//! must be unique within a sequence. The reconciler assumes both; this
//! module lets the renderer reject a violating tree up front.

use rustc_hash::FxHashSet;

use crate::error::{RenderError, RenderResult};
use crate::node::Node;

/// Check the key contract for every sibling sequence in `node`'s subtree.
pub fn check_keys<H>(node: &Node<H>) -> RenderResult<()> {
    check_siblings(node.child_nodes())?;
    node.child_nodes().iter().try_for_each(check_keys)
}

/// Check one sibling sequence (not recursive).
pub fn check_siblings<H>(siblings: &[Node<H>]) -> RenderResult<()> {
    let Some(first) = siblings.first() else {
        return Ok(());
    };
    let keyed = first.key.is_some();

    let mut seen = FxHashSet::default();
    for (index, node) in siblings.iter().enumerate() {
        match &node.key {
            Some(key) if keyed => {
                if !seen.insert(key) {
                    return Err(RenderError::DuplicateKey { key: key.clone() });
                }
            }
            None if !keyed => {}
            _ => return Err(RenderError::MixedKeys { index }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    type N = Node<u32>;

    fn keyed(keys: &[&str]) -> Vec<N> {
        keys.iter().map(|k| Node::element("li").with_key(*k)).collect()
    }

    #[test]
    fn test_all_keyed_ok() {
        assert_eq!(check_siblings(&keyed(&["a", "b", "c"])), Ok(()));
        assert_eq!(check_siblings::<u32>(&[]), Ok(()));
    }

    #[test]
    fn test_all_unkeyed_ok() {
        let nodes: Vec<N> = vec![Node::text("a"), Node::element("br"), Node::text("b")];
        assert_eq!(check_siblings(&nodes), Ok(()));
    }

    #[test]
    fn test_duplicate_key() {
        assert_eq!(
            check_siblings(&keyed(&["a", "b", "a"])),
            Err(RenderError::duplicate_key("a"))
        );
    }

    #[test]
    fn test_mixed_keys() {
        let mut nodes = keyed(&["a", "b"]);
        nodes.insert(1, Node::element("li"));
        assert_eq!(check_siblings(&nodes), Err(RenderError::MixedKeys { index: 1 }));

        let nodes: Vec<N> = vec![Node::element("li"), Node::element("li").with_key("x")];
        assert_eq!(check_siblings(&nodes), Err(RenderError::MixedKeys { index: 1 }));
    }

    #[test]
    fn test_nested_violation_found() {
        let tree: N = Node::element("div").child(
            Node::fragment(keyed(&["a", "a"])).with_key("f"),
        );
        assert!(matches!(check_keys(&tree), Err(RenderError::DuplicateKey { .. })));
    }

    #[test]
    fn test_same_key_in_different_sequences_ok() {
        let tree: N = Node::element("div").children([
            Node::element("ul").with_key("1").children(keyed(&["a"])),
            Node::element("ul").with_key("2").children(keyed(&["a"])),
        ]);
        assert_eq!(check_keys(&tree), Ok(()));
    }
}
