//! Tests for tree construction and navigation.

use sift_dom::{DomTree, ElementData, NodeId, NodeType};

/// Build: <div id="outer"><p>one</p><!-- c --><span>two</span></div>
fn sample_tree() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[("id", "outer")]);
    let p = tree.append_element(div, "p", &[]);
    let _ = tree.append_text(p, "one");
    let comment = tree.append_comment(div, " c ");
    let span = tree.append_element(div, "span", &[]);
    let _ = tree.append_text(span, "two");
    (tree, div, p, comment, span)
}

#[test]
fn test_new_tree_has_only_document() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert!(matches!(
        tree.get(NodeId::ROOT).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
    assert_eq!(tree.first_child(NodeId::ROOT), None);
}

#[test]
fn test_append_links_parent_and_siblings() {
    let (tree, div, p, comment, span) = sample_tree();

    assert_eq!(tree.children(div), &[p, comment, span]);
    assert_eq!(tree.first_child(div), Some(p));
    assert_eq!(tree.last_child(div), Some(span));
    assert_eq!(tree.next_sibling(p), Some(comment));
    assert_eq!(tree.prev_sibling(span), Some(comment));
    assert_eq!(tree.prev_sibling(p), None);
    assert_eq!(tree.next_sibling(span), None);
    assert_eq!(tree.parent(span), Some(div));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_descendants_in_document_order() {
    let (tree, div, p, comment, span) = sample_tree();
    let all: Vec<_> = tree.descendants(NodeId::ROOT).collect();
    let p_text = tree.first_child(p).unwrap();
    let span_text = tree.first_child(span).unwrap();
    assert_eq!(all, vec![div, p, p_text, comment, span, span_text]);
}

#[test]
fn test_descendants_of_leaf_is_empty() {
    let (tree, _, p, comment, _) = sample_tree();
    let text = tree.first_child(p).unwrap();
    assert_eq!(tree.descendants(text).count(), 0);
    assert_eq!(tree.descendants(comment).count(), 0);
}

#[test]
fn test_unknown_node_has_no_links() {
    let (tree, ..) = sample_tree();
    let missing = NodeId(tree.len());
    assert!(tree.get(missing).is_none());
    assert!(tree.children(missing).is_empty());
    assert_eq!(tree.parent(missing), None);
    assert_eq!(tree.as_element(missing).map(|e| e.tag_name.as_str()), None);
}

#[test]
fn test_node_payload_accessors() {
    let (tree, div, p, comment, _) = sample_tree();
    let text = tree.first_child(p).unwrap();
    assert_eq!(tree.as_text(text), Some("one"));
    assert_eq!(tree.as_text(comment), None);
    assert_eq!(tree.as_element(div).and_then(ElementData::id), Some("outer"));
    assert!(tree.as_element(text).is_none());
}

#[test]
fn test_element_attribute_lookup() {
    let element = ElementData::new("a", &[("HREF", "/x"), ("class", " a\tb  c ")]);
    assert_eq!(element.attr("href"), Some("/x"));
    assert_eq!(element.attr("CLASS"), Some(" a\tb  c "));
    assert_eq!(element.attr("title"), None);
    assert_eq!(element.id(), None);
}

#[test]
fn test_attributes_keep_source_order() {
    let element = ElementData::new("input", &[("type", "text"), ("name", "q"), ("type", "x")]);
    let names: Vec<_> = element.attrs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["type", "name", "type"]);
    assert_eq!(element.attr("type"), Some("text"));
}
