//! The node-tree collaborator seam.
//!
//! The engine never manipulates markup trees directly; everything goes
//! through [`DocumentNode`], a handle-based interface over whatever tree
//! library the host uses. Handles are cheap to clone (reference-style) and
//! compare by node identity, consistent with the engine's single-threaded
//! cooperative execution model. `bindlab-dom` provides the reference
//! implementation.

use std::fmt::Display;

/// A cheap, clonable handle to one node in a markup tree.
///
/// Two handle values may designate the same underlying node; identity is
/// decided by [`same_node`](DocumentNode::same_node), never by `==` on the
/// handle. Mutating operations take `&self` because handles borrow the
/// tree, they do not own it.
pub trait DocumentNode: Clone {
    /// Structural copy of this node and its entire subtree. The copy is
    /// detached and fully independent: mutating it never affects the
    /// original, and vice versa.
    fn deep_clone(&self) -> Self;

    /// Append `child` as the last child of this node, detaching it from
    /// any previous parent first.
    fn append_child(&self, child: &Self);

    /// Remove this node from its parent, if it has one. The subtree stays
    /// alive and can be re-attached later.
    fn detach(&self);

    /// The current parent, or `None` for a detached or root node.
    fn parent(&self) -> Option<Self>;

    /// Snapshot of the current child nodes, in document order, text nodes
    /// included. Mutating the tree does not invalidate the snapshot.
    fn children(&self) -> Vec<Self>;

    /// Whether this handle designates a text node.
    fn is_text(&self) -> bool;

    /// The content of a text node; `None` for element nodes.
    fn text(&self) -> Option<String>;

    /// Replace the content of a text node. Ignored on element nodes.
    fn set_text(&self, content: &str);

    /// The value of the named attribute, or `None` if absent (always
    /// `None` on text nodes).
    fn attribute(&self, name: &str) -> Option<String>;

    /// Snapshot of all attributes as `(name, value)` pairs, in document
    /// order (empty on text nodes).
    fn attributes(&self) -> Vec<(String, String)>;

    /// Set or replace the named attribute. Ignored on text nodes.
    fn set_attribute(&self, name: &str, value: &str);

    /// Whether two handles designate the same underlying node.
    fn same_node(&self, other: &Self) -> bool;
}

/// Markup parsing collaborator for
/// [`TemplateRegistry::register_source`](crate::template::TemplateRegistry::register_source).
///
/// Parse failures are flattened into
/// [`BindError::FragmentParse`](crate::error::BindError::FragmentParse)
/// by the registry, so the error type only needs to display itself.
pub trait FragmentParser {
    /// Node handle type produced by this parser.
    type Node: DocumentNode;

    /// Parse failure type.
    type Error: Display;

    /// Parse a markup source string into a detached fragment node whose
    /// children are the parsed top-level nodes.
    fn parse_fragment(&self, source: &str) -> Result<Self::Node, Self::Error>;
}
