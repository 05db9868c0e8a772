//! Virtual node types.
//!
//! A [`Node`] describes one position of the desired UI tree. It is generic
//! over the host handle type `H`: a node built by the caller has no handle,
//! and the renderer fills it in on mount or hands it over from the previous
//! node on patch.
//!
//! # Building
//!
//! ```
//! use tola_renderer::node::Node;
//!
//! let list: Node<u32> = Node::element("ul").children(
//!     ["a", "b", "c"].into_iter().map(|k| Node::element("li").with_key(k).with_text(k)),
//! );
//! assert_eq!(list.child_nodes().len(), 3);
//! ```

mod children;
mod key;

pub use children::{Children, NodeList};
pub use key::Key;

use compact_str::CompactString;

use crate::props::{PropKey, PropValue, Props, PropsExt};

/// Element tag name
pub type Tag = CompactString;

// =============================================================================
// NodeKind
// =============================================================================

/// Closed set of node kinds.
///
/// Two nodes are the same kind only if they are both text, both comment,
/// both fragment, or elements with the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Host element with a tag
    Element(Tag),
    /// Text node; content lives in `children`
    Text,
    /// Comment node; content lives in `children`
    Comment,
    /// Grouping of children with no host object of its own
    Fragment,
}

impl NodeKind {
    /// Short name for logging
    pub fn name(&self) -> &str {
        match self {
            Self::Element(tag) => tag,
            Self::Text => "#text",
            Self::Comment => "#comment",
            Self::Fragment => "#fragment",
        }
    }
}

// =============================================================================
// Node<H>
// =============================================================================

/// One position in the virtual tree.
#[derive(Debug)]
pub struct Node<H> {
    /// What this node is
    pub kind: NodeKind,
    /// Identity among siblings
    pub key: Option<Key>,
    /// Text content or child nodes
    pub children: Children<H>,
    /// Attributes and event bindings (elements only)
    pub props: Props,
    /// Backing host object; `None` until mounted. Always `None` for fragments.
    pub handle: Option<H>,
}

impl<H> Node<H> {
    fn with_kind(kind: NodeKind, children: Children<H>) -> Self {
        Self {
            kind,
            key: None,
            children,
            props: Props::new(),
            handle: None,
        }
    }

    /// Create an element node.
    pub fn element(tag: impl Into<Tag>) -> Self {
        Self::with_kind(NodeKind::Element(tag.into()), Children::Empty)
    }

    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text, Children::Text(content.into()))
    }

    /// Create a comment node.
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Comment, Children::Text(content.into()))
    }

    /// Create a fragment from child nodes.
    pub fn fragment(children: impl IntoIterator<Item = Node<H>>) -> Self {
        Self::with_kind(NodeKind::Fragment, children.into_iter().collect())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the sibling key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set a prop.
    pub fn prop(mut self, name: impl Into<PropKey>, value: impl Into<PropValue>) -> Self {
        self.props.set_prop(name, value);
        self
    }

    /// Replace children with a single text string.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = Children::Text(text.into());
        self
    }

    /// Append a child node, turning text children into a sequence.
    pub fn child(mut self, child: Node<H>) -> Self {
        if let Children::Nodes(nodes) = &mut self.children {
            nodes.push(child);
        } else {
            self.children = Children::Nodes(vec![child]);
        }
        self
    }

    /// Replace children with a node sequence.
    pub fn children(mut self, children: impl IntoIterator<Item = Node<H>>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Element tag, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Check if this is a fragment.
    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.kind == NodeKind::Fragment
    }

    /// Check if a backing host object has been assigned.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    /// Backing host handle, if mounted.
    #[inline]
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Check if both nodes are the same kind (and tag).
    #[inline]
    pub fn same_kind(&self, other: &Self) -> bool {
        self.kind == other.kind
    }

    /// Child nodes; empty for text children or none.
    #[inline]
    pub fn child_nodes(&self) -> &[Node<H>] {
        self.children.nodes()
    }

    /// Find a direct child by key.
    pub fn find_child(&self, key: &Key) -> Option<&Node<H>> {
        self.child_nodes().iter().find(|n| n.key.as_ref() == Some(key))
    }

    /// Copy of this subtree without host handles, ready to render again.
    pub fn detached(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            key: self.key.clone(),
            children: self.children.detached(),
            props: self.props.clone(),
            handle: None,
        }
    }
}

impl<H: Clone> Node<H> {
    /// First host handle in document order at this position.
    ///
    /// For fragments this is the first handle found among the children;
    /// an empty fragment has none.
    pub fn first_handle(&self) -> Option<H> {
        match self.kind {
            NodeKind::Fragment => self.child_nodes().iter().find_map(Node::first_handle),
            _ => self.handle.clone(),
        }
    }

    /// Last host handle in document order at this position.
    pub fn last_handle(&self) -> Option<H> {
        match self.kind {
            NodeKind::Fragment => self.child_nodes().iter().rev().find_map(Node::last_handle),
            _ => self.handle.clone(),
        }
    }
}
