//! The one-time subtree scan.
//!
//! [`scan`] walks a live root node exactly once and produces a
//! [`ScanContext`]: named controls (live handles), named list bindings
//! (container plus detached item template), and the placeholder
//! [`BindingTable`]. Later lookups, renders, and list instantiation all
//! work off this context without touching the tree again.

use std::collections::HashMap;

use crate::bind::BindingTable;
use crate::error::{BindError, Result};
use crate::list::{DynamicList, ListItem};
use crate::markers::{CONTROL_MARKER, LIST_ITEM_MARKER};
use crate::node::DocumentNode;
use crate::placeholder::contains_placeholder;
use crate::warning::{report, Warning};

/// A named pairing of a live container node and the detached, repeatable
/// item template that was removed from it at scan time.
#[derive(Debug, Clone)]
pub struct ListBinding<N> {
    /// The container the item template was detached from; new items are
    /// appended here.
    pub container: N,
    /// The detached item template, cloned once per instantiated item.
    pub item_template: N,
}

/// The result of scanning a subtree: controls, list bindings, placeholder
/// bindings, and the anomalies observed while building them.
///
/// The context holds live handles into the scanned document but does not
/// own the nodes' lifetimes; the surrounding document does.
#[derive(Debug)]
pub struct ScanContext<N: DocumentNode> {
    controls: HashMap<String, N>,
    lists: HashMap<String, ListBinding<N>>,
    bindings: BindingTable<N>,
    warnings: Vec<Warning>,
}

/// Walk `root` once, depth-first, and build the scan context.
///
/// - An element carrying [`LIST_ITEM_MARKER`] is recorded as a list
///   binding (its parent becomes the container), detached, and not
///   descended into: its markers and placeholders belong to future
///   instances, not to the scanned page.
/// - An element carrying [`CONTROL_MARKER`] is recorded as a live handle
///   without detaching, and its subtree is scanned normally.
/// - Every visited element contributes an attribute binding per attribute
///   value containing a placeholder; every visited text node with a
///   placeholder becomes a text binding. Text nodes are bound
///   individually, so mixed text/element content binds correctly.
///
/// Marker registration applies to descendants only; `root`'s own
/// attributes and text children still join the binding table. Duplicate
/// identifiers are reported and the later registration wins.
pub fn scan<N: DocumentNode>(root: &N) -> ScanContext<N> {
    let mut context = ScanContext {
        controls: HashMap::new(),
        lists: HashMap::new(),
        bindings: BindingTable::new(),
        warnings: Vec::new(),
    };
    context.visit(root, true);

    tracing::debug!(
        controls = context.controls.len(),
        lists = context.lists.len(),
        bindings = context.bindings.len(),
        "scanned subtree"
    );
    context
}

impl<N: DocumentNode> ScanContext<N> {
    fn visit(&mut self, node: &N, is_root: bool) {
        if node.is_text() {
            if let Some(content) = node.text() {
                if contains_placeholder(&content) {
                    self.bindings.push_text(node.clone(), content);
                }
            }
            return;
        }

        if !is_root {
            if let Some(id) = node.attribute(LIST_ITEM_MARKER) {
                self.record_list_item(id, node);
                return;
            }
            if let Some(id) = node.attribute(CONTROL_MARKER) {
                if self.controls.contains_key(&id) {
                    report(&mut self.warnings, Warning::DuplicateControl { id: id.clone() });
                }
                self.controls.insert(id, node.clone());
            }
        }

        for (name, value) in node.attributes() {
            if contains_placeholder(&value) {
                self.bindings.push_attribute(node.clone(), name, value);
            }
        }

        for child in node.children() {
            self.visit(&child, false);
        }
    }

    /// List items are detached from their parent at scan time, so the
    /// container starts empty and grows only by instantiation.
    fn record_list_item(&mut self, id: String, node: &N) {
        let Some(container) = node.parent() else {
            // A marked node with no parent has no container to attach
            // instances to; nothing usable to record.
            return;
        };
        if self.lists.contains_key(&id) {
            report(&mut self.warnings, Warning::DuplicateList { id: id.clone() });
        }
        node.detach();
        self.lists.insert(
            id,
            ListBinding {
                container,
                item_template: node.clone(),
            },
        );
    }

    /// Look up a named live control node.
    pub fn control(&self, id: &str) -> Result<&N> {
        match self.controls.get(id) {
            Some(node) => Ok(node),
            None => {
                tracing::warn!("control '{}' is not in the scanned subtree", id);
                Err(BindError::ControlNotFound(id.to_string()))
            }
        }
    }

    /// Look up a named list binding.
    pub fn list_binding(&self, id: &str) -> Result<&ListBinding<N>> {
        match self.lists.get(id) {
            Some(binding) => Ok(binding),
            None => {
                tracing::warn!("list '{}' is not in the scanned subtree", id);
                Err(BindError::ListNotFound(id.to_string()))
            }
        }
    }

    /// Build a typed dynamic list over a named list binding.
    ///
    /// Each call constructs a fresh, empty list sharing the binding's
    /// container and item-template handles; items instantiated through one
    /// list are not tracked by another.
    pub fn list<W: ListItem<N>>(&self, id: &str) -> Result<DynamicList<N, W>> {
        let binding = self.list_binding(id)?;
        Ok(DynamicList::new(
            binding.container.clone(),
            binding.item_template.clone(),
        ))
    }

    /// The placeholder bindings recorded by the scan.
    pub fn bindings(&self) -> &BindingTable<N> {
        &self.bindings
    }

    /// Re-render every placeholder binding from `data`. Call-through to
    /// [`BindingTable::render`].
    pub fn render(&self, data: &crate::bind::DataMap) -> Vec<Warning> {
        self.bindings.render(data)
    }

    /// Anomalies observed while scanning (duplicate identifiers).
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Registered control identifiers, in no particular order.
    pub fn control_ids(&self) -> impl Iterator<Item = &str> {
        self.controls.keys().map(String::as_str)
    }

    /// Registered list identifiers, in no particular order.
    pub fn list_ids(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }
}
