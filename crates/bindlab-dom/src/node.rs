//! Reference-counted markup node handles.
//!
//! A [`NodeRef`] is a cheap handle to one node in a markup tree: elements
//! carry a tag, ordered attributes, and children; text nodes carry
//! content. Parent links are weak, so dropping the last handle to a
//! subtree frees it. Interior mutability keeps the tree single-threaded
//! (`NodeRef` is `!Send`/`!Sync`), matching the engine's cooperative
//! execution model.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use bindlab_core::node::DocumentNode;

/// Reserved tag of the synthetic element that wraps the top-level nodes of
/// a parsed fragment. It serializes as its children only.
pub const FRAGMENT_TAG: &str = "#fragment";

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: RefCell<Vec<(String, String)>>,
    },
    Text {
        content: RefCell<String>,
    },
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<NodeRef>>,
}

/// A handle to one markup node. Clones share the node; identity is
/// [`same_node`](DocumentNode::same_node), not `==`.
#[derive(Debug, Clone)]
pub struct NodeRef(Rc<NodeData>);

impl NodeRef {
    /// Create a detached element node.
    pub fn new_element(tag: &str) -> NodeRef {
        NodeRef(Rc::new(NodeData {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                attributes: RefCell::new(Vec::new()),
            },
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Create a detached text node.
    pub fn new_text(content: &str) -> NodeRef {
        NodeRef(Rc::new(NodeData {
            kind: NodeKind::Text {
                content: RefCell::new(content.to_string()),
            },
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// The element tag, or `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.0.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }

    /// Whether this handle designates an element node.
    pub fn is_element(&self) -> bool {
        matches!(self.0.kind, NodeKind::Element { .. })
    }

    /// Concatenated content of this node's text descendants (the node's
    /// own content for a text node).
    pub fn text_content(&self) -> String {
        match &self.0.kind {
            NodeKind::Text { content } => content.borrow().clone(),
            NodeKind::Element { .. } => {
                let mut out = String::new();
                for child in self.0.children.borrow().iter() {
                    out.push_str(&child.text_content());
                }
                out
            }
        }
    }

    /// Serialize the subtree back to markup. Text and attribute values are
    /// entity-encoded; the synthetic [`FRAGMENT_TAG`] element prints its
    /// children only.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match &self.0.kind {
            NodeKind::Text { content } => out.push_str(&encode_text(&content.borrow())),
            NodeKind::Element { tag, attributes } => {
                if tag == FRAGMENT_TAG {
                    for child in self.0.children.borrow().iter() {
                        child.write_markup(out);
                    }
                    return;
                }
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes.borrow().iter() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&encode_attribute(value));
                    out.push('"');
                }
                let children = self.0.children.borrow();
                if children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in children.iter() {
                        child.write_markup(out);
                    }
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                }
            }
        }
    }
}

impl DocumentNode for NodeRef {
    fn deep_clone(&self) -> Self {
        let copy = match &self.0.kind {
            NodeKind::Element { tag, attributes } => {
                let element = NodeRef::new_element(tag);
                if let NodeKind::Element { attributes: copied, .. } = &element.0.kind {
                    *copied.borrow_mut() = attributes.borrow().clone();
                }
                element
            }
            NodeKind::Text { content } => NodeRef::new_text(&content.borrow()),
        };
        for child in self.0.children.borrow().iter() {
            copy.append_child(&child.deep_clone());
        }
        copy
    }

    fn append_child(&self, child: &Self) {
        if !self.is_element() {
            return;
        }
        child.detach();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    fn detach(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .children
            .borrow_mut()
            .retain(|sibling| !Rc::ptr_eq(&sibling.0, &self.0));
        *self.0.parent.borrow_mut() = Weak::new();
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(NodeRef)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn is_text(&self) -> bool {
        matches!(self.0.kind, NodeKind::Text { .. })
    }

    fn text(&self) -> Option<String> {
        match &self.0.kind {
            NodeKind::Text { content } => Some(content.borrow().clone()),
            NodeKind::Element { .. } => None,
        }
    }

    fn set_text(&self, new_content: &str) {
        if let NodeKind::Text { content } = &self.0.kind {
            *content.borrow_mut() = new_content.to_string();
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.kind {
            NodeKind::Element { attributes, .. } => attributes
                .borrow()
                .iter()
                .find(|(existing, _)| existing == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text { .. } => None,
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match &self.0.kind {
            NodeKind::Element { attributes, .. } => attributes.borrow().clone(),
            NodeKind::Text { .. } => Vec::new(),
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &self.0.kind {
            let mut attributes = attributes.borrow_mut();
            match attributes.iter_mut().find(|(existing, _)| existing == name) {
                Some((_, existing_value)) => *existing_value = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn encode_text(raw: &str) -> String {
    encode(raw, false)
}

fn encode_attribute(raw: &str) -> String {
    encode(raw, true)
}

fn encode(raw: &str, quote: bool) -> String {
    if !raw.contains(['&', '<', '>', '"']) {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests;
