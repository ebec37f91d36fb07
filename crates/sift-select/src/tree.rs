//! The read-only view of a document tree that selector matching needs.
//!
//! Matching only ever reads node kinds, element names, attributes, text and
//! the parent/child/sibling links. Implement [`SelectorTree`] for your tree
//! type to match against it; [`sift_dom::DomTree`] implements it out of the box.

use sift_dom::{DomTree, NodeId, NodeType};

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// The node types selector matching distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The document itself; the parent of the root element.
    Document,
    /// An element with a tag name and attributes.
    Element,
    /// Character data.
    Text,
    /// A comment; ignored by every sibling and emptiness test.
    Comment,
}

/// Read access to a tree of nodes.
///
/// Handles are cheap copies (`NodeId`-like). Links are followed for lookups
/// only, so a tree may hand out handles that point back up the tree.
pub trait SelectorTree {
    /// Handle to a node of this tree.
    type Node: Copy + Eq;

    /// The node type of `node`.
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// Local name of an element, lowercase for HTML. `None` for non-elements.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Attributes of an element in source order. Empty for non-elements.
    fn attributes<'a>(&'a self, node: Self::Node) -> impl Iterator<Item = (&'a str, &'a str)>;

    /// Data of a text node. `None` for anything else.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Parent of `node`, if attached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First child of `node`.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Last child of `node`.
    fn last_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Sibling immediately after `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Sibling immediately before `node`.
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` is an element.
    fn is_element(&self, node: Self::Node) -> bool {
        self.kind(node) == NodeKind::Element
    }
}

impl SelectorTree for DomTree {
    type Node = NodeId;

    fn kind(&self, node: NodeId) -> NodeKind {
        match self.get(node).map(|n| &n.node_type) {
            Some(NodeType::Element(_)) => NodeKind::Element,
            Some(NodeType::Text(_)) => NodeKind::Text,
            Some(NodeType::Comment(_)) => NodeKind::Comment,
            Some(NodeType::Document) | None => NodeKind::Document,
        }
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|e| e.tag_name.as_str())
    }

    fn attributes<'a>(&'a self, node: NodeId) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.as_element(node)
            .into_iter()
            .flat_map(|e| e.attrs.iter())
            .map(|a| (a.name.as_str(), a.value.as_str()))
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.as_text(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        Self::first_child(self, node)
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        Self::last_child(self, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::next_sibling(self, node)
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        Self::prev_sibling(self, node)
    }
}

/// Iterate over the children of `node`, first to last.
pub(crate) fn children<T: SelectorTree>(tree: &T, node: T::Node) -> impl Iterator<Item = T::Node> {
    std::iter::successors(tree.first_child(node), move |&c| tree.next_sibling(c))
}

/// Iterate over the children of `node`, last to first.
pub(crate) fn children_rev<T: SelectorTree>(tree: &T, node: T::Node) -> impl Iterator<Item = T::Node> {
    std::iter::successors(tree.last_child(node), move |&c| tree.prev_sibling(c))
}

/// Iterate over the strict ancestors of `node`, nearest first.
pub(crate) fn ancestors<T: SelectorTree>(tree: &T, node: T::Node) -> impl Iterator<Item = T::Node> {
    std::iter::successors(tree.parent(node), move |&p| tree.parent(p))
}

/// Iterate over the siblings before `node`, nearest first.
pub(crate) fn preceding_siblings<T: SelectorTree>(
    tree: &T,
    node: T::Node,
) -> impl Iterator<Item = T::Node> {
    std::iter::successors(tree.prev_sibling(node), move |&s| tree.prev_sibling(s))
}
