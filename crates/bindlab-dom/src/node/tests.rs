//! Tests for node handles and tree operations

use super::*;

fn labeled(tag: &str, text: &str) -> NodeRef {
    let element = NodeRef::new_element(tag);
    element.append_child(&NodeRef::new_text(text));
    element
}

#[test]
fn test_append_and_parent_links() {
    let parent = NodeRef::new_element("div");
    let child = NodeRef::new_element("p");

    parent.append_child(&child);
    assert_eq!(parent.children().len(), 1);
    assert!(child.parent().unwrap().same_node(&parent));
}

#[test]
fn test_append_moves_between_parents() {
    let first = NodeRef::new_element("div");
    let second = NodeRef::new_element("div");
    let child = NodeRef::new_element("p");

    first.append_child(&child);
    second.append_child(&child);

    assert!(first.children().is_empty());
    assert_eq!(second.children().len(), 1);
    assert!(child.parent().unwrap().same_node(&second));
}

#[test]
fn test_detach_clears_parent() {
    let parent = NodeRef::new_element("div");
    let child = labeled("p", "x");
    parent.append_child(&child);

    child.detach();
    assert!(parent.children().is_empty());
    assert!(child.parent().is_none());
    // The detached subtree stays alive.
    assert_eq!(child.text_content(), "x");
}

#[test]
fn test_detach_without_parent_is_a_noop() {
    let orphan = NodeRef::new_element("div");
    orphan.detach();
    assert!(orphan.parent().is_none());
}

#[test]
fn test_set_attribute_inserts_then_replaces() {
    let element = NodeRef::new_element("div");
    assert!(element.attribute("class").is_none());

    element.set_attribute("class", "a");
    element.set_attribute("id", "root");
    element.set_attribute("class", "b");

    assert_eq!(element.attribute("class").unwrap(), "b");
    assert_eq!(
        element.attributes(),
        vec![
            ("class".to_string(), "b".to_string()),
            ("id".to_string(), "root".to_string()),
        ]
    );
}

#[test]
fn test_text_nodes_have_no_attributes_or_children() {
    let text = NodeRef::new_text("hi");
    assert!(text.is_text());
    assert!(text.attribute("class").is_none());
    assert!(text.attributes().is_empty());

    text.set_attribute("class", "ignored");
    assert!(text.attributes().is_empty());

    // Appending to a text node is ignored.
    text.append_child(&NodeRef::new_element("div"));
    assert!(text.children().is_empty());
}

#[test]
fn test_set_text() {
    let text = NodeRef::new_text("before");
    text.set_text("after");
    assert_eq!(text.text(), Some("after".to_string()));

    let element = NodeRef::new_element("div");
    element.set_text("ignored");
    assert_eq!(element.text(), None);
}

#[test]
fn test_deep_clone_is_fully_independent() {
    let original = NodeRef::new_element("div");
    original.set_attribute("class", "card");
    original.append_child(&labeled("p", "body"));

    let copy = original.deep_clone();
    assert_eq!(copy.to_markup(), original.to_markup());
    assert!(!copy.same_node(&original));
    assert!(copy.parent().is_none());

    copy.set_attribute("class", "changed");
    copy.children()[0].children()[0].set_text("edited");

    assert_eq!(original.attribute("class").unwrap(), "card");
    assert_eq!(original.text_content(), "body");
}

#[test]
fn test_same_node_is_identity_not_structure() {
    let a = NodeRef::new_element("div");
    let b = NodeRef::new_element("div");
    assert!(!a.same_node(&b));
    assert!(a.same_node(&a.clone()));
}

#[test]
fn test_to_markup_shapes() {
    let element = NodeRef::new_element("div");
    element.set_attribute("class", "c");
    assert_eq!(element.to_markup(), r#"<div class="c"/>"#);

    element.append_child(&labeled("p", "hi"));
    assert_eq!(element.to_markup(), r#"<div class="c"><p>hi</p></div>"#);
}

#[test]
fn test_to_markup_encodes_entities() {
    let element = NodeRef::new_element("div");
    element.set_attribute("title", r#"a "b" & c"#);
    element.append_child(&NodeRef::new_text("1 < 2 & 3 > 2"));
    assert_eq!(
        element.to_markup(),
        r#"<div title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3 &gt; 2</div>"#
    );
}
