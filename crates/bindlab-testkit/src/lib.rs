//! Test utilities for bindlab
//!
//! This crate provides shared markup fixtures and tree helpers used across
//! the bindlab workspace's test suites. Helpers panic on malformed input;
//! they are for tests only.

pub mod fixtures;

pub use fixtures::{sample_page, template_pack_source, SAMPLE_PAGE, TEMPLATE_PACK};

use bindlab_core::node::DocumentNode;
use bindlab_dom::NodeRef;

/// Parse a markup fragment, panicking on failure.
///
/// # Panics
///
/// Panics if `source` does not parse; tests should only feed it fixtures
/// they control.
pub fn parse(source: &str) -> NodeRef {
    bindlab_dom::parse_fragment(source)
        .unwrap_or_else(|e| panic!("fixture failed to parse: {}", e))
}

/// First descendant element with the given tag, in document order.
///
/// # Panics
///
/// Panics if no such element exists under `root`.
pub fn element_by_tag(root: &NodeRef, tag: &str) -> NodeRef {
    fn search(node: &NodeRef, tag: &str) -> Option<NodeRef> {
        if node.tag() == Some(tag) {
            return Some(node.clone());
        }
        for child in node.children() {
            if let Some(found) = search(&child, tag) {
                return Some(found);
            }
        }
        None
    }
    search(root, tag).unwrap_or_else(|| panic!("no <{}> element in fixture", tag))
}

/// Element children of a node, skipping text nodes.
pub fn element_children(node: &NodeRef) -> Vec<NodeRef> {
    node.children()
        .into_iter()
        .filter(|child| child.is_element())
        .collect()
}
