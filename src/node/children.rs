//! Child content of a node: nothing, a text string, or a node sequence

use super::Node;

/// Ordered sibling sequence.
pub type NodeList<H> = Vec<Node<H>>;

/// Children of a node.
///
/// For text and comment nodes `Text` holds the node's own content.
/// For elements `Text` means "a single text child", set through the host's
/// `set_element_text` rather than as a separate node.
#[derive(Debug)]
pub enum Children<H> {
    /// No children
    Empty,
    /// Text content
    Text(String),
    /// Ordered child nodes
    Nodes(NodeList<H>),
}

impl<H> Default for Children<H> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<H> Children<H> {
    /// Check if there are no children at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Get the text content, if children are a string.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the child nodes, if children are a sequence.
    #[inline]
    pub fn as_nodes(&self) -> Option<&[Node<H>]> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Get the child nodes mutably, if children are a sequence.
    #[inline]
    pub fn as_nodes_mut(&mut self) -> Option<&mut [Node<H>]> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Child nodes, or an empty slice when children are text or absent.
    #[inline]
    pub fn nodes(&self) -> &[Node<H>] {
        self.as_nodes().unwrap_or(&[])
    }

    /// Copy of these children with all host handles cleared.
    pub fn detached(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Text(text) => Self::Text(text.clone()),
            Self::Nodes(nodes) => Self::Nodes(nodes.iter().map(Node::detached).collect()),
        }
    }
}

impl<H> FromIterator<Node<H>> for Children<H> {
    fn from_iter<I: IntoIterator<Item = Node<H>>>(iter: I) -> Self {
        Self::Nodes(iter.into_iter().collect())
    }
}
