//! Template extraction and storage.
//!
//! A registry owns named, detached sub-trees pulled out of larger document
//! fragments. Registration walks a fragment for nodes carrying the
//! [`TEMPLATE_MARKER`] attribute, detaches each one, and stores it under
//! the marker's value; callers later obtain independent structural copies
//! with [`TemplateRegistry::clone_template`].

use std::collections::HashMap;

use crate::error::{BindError, Result};
use crate::markers::{TEMPLATE_BEGIN, TEMPLATE_END, TEMPLATE_MARKER};
use crate::node::{DocumentNode, FragmentParser};
use crate::warning::{report, Warning};

/// Named detached sub-trees, keyed by template identifier.
///
/// The registry owns its templates exclusively: stored sub-trees are never
/// mutated after detachment and are only handed out as deep clones.
#[derive(Debug)]
pub struct TemplateRegistry<N: DocumentNode> {
    templates: HashMap<String, N>,
}

impl<N: DocumentNode> TemplateRegistry<N> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Extract and store every template marked under `fragment`.
    ///
    /// Marked nodes are collected in document order, then detached from
    /// their parents one by one; a marked node nested inside another marked
    /// node therefore ends up as its own entry, removed from the outer
    /// template. A reused identifier is reported and the later registration
    /// wins.
    pub fn register_fragment(&mut self, fragment: &N) -> Vec<Warning> {
        let mut warnings = Vec::new();
        let mut marked = Vec::new();
        for child in fragment.children() {
            collect_marked(&child, &mut marked);
        }

        for (id, node) in marked {
            if self.templates.contains_key(&id) {
                report(&mut warnings, Warning::DuplicateTemplate { id: id.clone() });
            }
            node.detach();
            self.templates.insert(id, node);
        }

        tracing::debug!(
            templates = self.templates.len(),
            "registered template fragment"
        );
        warnings
    }

    /// Extract the template block embedded in `content` and register it.
    ///
    /// The block is the text strictly between the literal
    /// [`TEMPLATE_BEGIN`] and [`TEMPLATE_END`] markers. The end marker is
    /// searched after the begin marker; a missing marker fails with
    /// [`BindError::SourceMarkers`]. The block is parsed into a fragment by
    /// the collaborator, with parse failures flattened into
    /// [`BindError::FragmentParse`].
    pub fn register_source<P>(&mut self, content: &str, parser: &P) -> Result<Vec<Warning>>
    where
        P: FragmentParser<Node = N>,
    {
        let begin = content.find(TEMPLATE_BEGIN).ok_or_else(|| {
            BindError::SourceMarkers(format!("begin marker '{}' not found", TEMPLATE_BEGIN))
        })?;
        let body_start = begin + TEMPLATE_BEGIN.len();
        let body_len = content[body_start..].find(TEMPLATE_END).ok_or_else(|| {
            BindError::SourceMarkers(format!(
                "end marker '{}' not found after begin marker",
                TEMPLATE_END
            ))
        })?;

        let body = &content[body_start..body_start + body_len];
        let fragment = parser
            .parse_fragment(body)
            .map_err(|e| BindError::FragmentParse(e.to_string()))?;
        Ok(self.register_fragment(&fragment))
    }

    /// Structural copy of the stored template. The stored original is not
    /// mutated; successive clones are fully independent of each other.
    pub fn clone_template(&self, id: &str) -> Result<N> {
        match self.templates.get(id) {
            Some(template) => Ok(template.deep_clone()),
            None => {
                tracing::warn!("template '{}' is not registered", id);
                Err(BindError::TemplateNotFound(id.to_string()))
            }
        }
    }

    /// Whether a template is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Registered template identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<N: DocumentNode> Default for TemplateRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first collection of `(id, node)` pairs for marked nodes, in
/// document order.
fn collect_marked<N: DocumentNode>(node: &N, marked: &mut Vec<(String, N)>) {
    if let Some(id) = node.attribute(TEMPLATE_MARKER) {
        marked.push((id, node.clone()));
    }
    for child in node.children() {
        collect_marked(&child, marked);
    }
}
