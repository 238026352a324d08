//! Tests for the dynamic list
//!
//! Relocated from an in-crate `#[cfg(test)]` module to an integration test
//! so `bindlab_dom::NodeRef` resolves against the same `bindlab-core`
//! instance that `bindlab-dom` links against.

use bindlab_core::node::DocumentNode;
use bindlab_core::{DynamicList, ListItem};

use bindlab_dom::NodeRef;
use bindlab_testkit as testkit;

struct Row {
    node: NodeRef,
    clicks: u32,
}

impl Row {
    fn new(node: NodeRef) -> Self {
        Row { node, clicks: 0 }
    }
}

impl ListItem<NodeRef> for Row {
    fn node(&self) -> &NodeRef {
        &self.node
    }
}

fn empty_list() -> DynamicList<NodeRef, Row> {
    let container = testkit::element_by_tag(&testkit::parse("<ul/>"), "ul");
    let template = testkit::element_by_tag(&testkit::parse(r#"<li class="row">{{label}}</li>"#), "li");
    template.detach();
    DynamicList::new(container, template)
}

#[test]
fn test_add_attaches_one_clone_per_item() {
    let mut list = empty_list();
    assert!(list.is_empty());

    list.add(Row::new);
    assert_eq!(list.len(), 1);
    assert_eq!(list.container().children().len(), 1);

    list.add(Row::new);
    assert_eq!(list.len(), 2);
    assert_eq!(list.container().children().len(), 2);
}

#[test]
fn test_added_item_wraps_the_attached_node() {
    let mut list = empty_list();
    list.add(Row::new);

    let attached = list.container().children().into_iter().next().unwrap();
    assert!(list.iter().next().unwrap().node().same_node(&attached));
}

#[test]
fn test_items_are_independent_clones() {
    let mut list = empty_list();
    list.add(Row::new);
    list.add(Row::new);

    let children = list.container().children();
    children[0].set_attribute("class", "selected");

    assert_eq!(children[0].attribute("class").unwrap(), "selected");
    assert_eq!(children[1].attribute("class").unwrap(), "row");
}

#[test]
fn test_remove_detaches_and_forgets_the_item() {
    let mut list = empty_list();
    list.add(Row::new);
    let second = list.add(Row::new).node().clone();

    let doomed = Row {
        node: second.clone(),
        clicks: 0,
    };
    assert!(list.remove(&doomed));
    assert_eq!(list.len(), 1);
    assert_eq!(list.container().children().len(), 1);
    assert!(second.parent().is_none());
}

#[test]
fn test_remove_unknown_item_is_a_noop() {
    let mut list = empty_list();
    list.add(Row::new);

    let stranger = Row::new(NodeRef::new_element("li"));
    assert!(!list.remove(&stranger));
    assert_eq!(list.len(), 1);
    assert_eq!(list.container().children().len(), 1);
}

#[test]
fn test_iteration_order_and_mutation() {
    let mut list = empty_list();
    list.add(Row::new);
    list.add(Row::new);
    list.add(Row::new);

    for (index, row) in list.iter_mut().enumerate() {
        row.clicks = index as u32;
    }
    let clicks: Vec<u32> = list.iter().map(|row| row.clicks).collect();
    assert_eq!(clicks, vec![0, 1, 2]);
}

#[test]
fn test_template_is_never_attached_or_mutated() {
    let mut list = empty_list();
    let before = list.container().children().len();
    let row = list.add(Row::new);
    row.node().set_attribute("class", "mutated");

    // A later item still starts from the pristine template.
    let fresh = list.add(Row::new);
    assert_eq!(fresh.node().attribute("class").unwrap(), "row");
    assert_eq!(list.container().children().len(), before + 2);
}
