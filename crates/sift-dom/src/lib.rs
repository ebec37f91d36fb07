//! Arena document tree for the sift selector engine.
//!
//! Holds exactly what selector matching reads from a
//! [DOM](https://dom.spec.whatwg.org/): node kinds, element names, ordered
//! attribute lists, text data and the parent/child/sibling links.
//!
//! # Design
//!
//! Every node lives in one `Vec` and refers to its relatives by [`NodeId`].
//! A link is only an index, so walking up to a parent or across to a sibling
//! never borrows or owns anything. Nodes are only ever appended; the tree has
//! no removal or reparenting.

/// Index of a node in its [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node, created with the tree.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// One slot of the arena: the node's payload plus its tree links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its data.
    pub node_type: NodeType,
    /// `None` for the document.
    pub parent: Option<NodeId>,
    /// Children in tree order.
    pub children: Vec<NodeId>,
    /// The next child of the same parent.
    pub next_sibling: Option<NodeId>,
    /// The previous child of the same parent.
    pub prev_sibling: Option<NodeId>,
}

/// The node kinds a selector can tell apart.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Local name, as written.
    pub name: String,
    /// Value, compared case-sensitively by selectors.
    pub value: String,
}

/// Tag name and attribute list of an element.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Local name. HTML trees store it lowercase.
    pub tag_name: String,
    /// Attributes in source order. Duplicate names are kept.
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    /// Build element data from a tag name and `(name, value)` pairs.
    pub fn new(tag_name: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: attrs
                .iter()
                .map(|&(name, value)| Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    /// Value of the first attribute called `name`, ignoring ASCII case.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Shorthand for `attr("id")`.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// [§ 4.2 Node tree](https://dom.spec.whatwg.org/#node-trees)
///
/// A document and everything appended under it.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the document node at [`NodeId::ROOT`].
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }

    /// The node at `id`, if it exists.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Node count, the document included.
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true: the document node is always present.
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// [§ 4.2.3 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Push a new node and link it in as the last child of `parent`.
    fn insert(&mut self, parent: NodeId, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev_sibling = self.last_child(parent);

        self.nodes.push(Node {
            node_type,
            parent: Some(parent),
            children: Vec::new(),
            next_sibling: None,
            prev_sibling,
        });
        if let Some(prev) = prev_sibling {
            self.nodes[prev.0].next_sibling = Some(id);
        }
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element to `parent`. The tag name is stored as given.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.insert(parent, NodeType::Element(ElementData::new(tag, attrs)))
    }

    /// Append a text node to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.insert(parent, NodeType::Text(text.to_string()))
    }

    /// Append a comment to `parent`.
    pub fn append_comment(&mut self, parent: NodeId, data: &str) -> NodeId {
        self.insert(parent, NodeType::Comment(data.to_string()))
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id` in tree order; empty for an unknown id.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// First child of `id`.
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Last child of `id`.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    /// Sibling after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling
    }

    /// Sibling before `id`.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Every node below `id` in tree order (pre-order, depth-first), not
    /// including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            pending: self.children(id).iter().rev().copied().collect(),
        }
    }

    /// Element data of `id`, if it is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Data of `id`, if it is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order walk returned by [`DomTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DomTree,
    /// Nodes still to visit, next on top.
    pending: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
