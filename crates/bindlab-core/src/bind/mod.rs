//! The binding table and placeholder substitution.
//!
//! A [`BindingTable`] is the scan's record of every attribute value and
//! text node that contained a placeholder, together with the original raw
//! text captured at scan time. Rendering always substitutes into that
//! captured original, never into a previous render's output, which makes
//! [`BindingTable::render`] idempotent for unchanged data.

use serde_json::{Map, Value};

use crate::node::DocumentNode;
use crate::placeholder::{split, Segment};
use crate::warning::{report, Warning};

/// String-keyed substitution data supplied by the caller at render time.
///
/// Values are JSON: scalars stringify (strings verbatim, numbers and
/// booleans via their canonical form, `null` as the empty string); arrays
/// and objects have no single textual representation and are reported as
/// unrenderable. Nested objects are reachable through dotted field paths.
#[derive(Debug, Clone, Default)]
pub struct DataMap {
    values: Map<String, Value>,
}

impl DataMap {
    /// Create an empty data map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a data map from a JSON object. Returns `None` when `value` is
    /// not an object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }

    /// Insert a field, replacing any previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    /// Resolve a field: exact key first, then dotted-path traversal into
    /// nested objects (`user.name`). Exact match wins, so flat keys that
    /// happen to contain dots stay addressable.
    pub fn resolve(&self, field: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(field) {
            return Some(value);
        }

        let mut parts = field.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

impl From<Map<String, Value>> for DataMap {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// One recorded placeholder location plus the raw text captured when it
/// was scanned.
#[derive(Debug, Clone)]
pub enum PlaceholderBinding<N> {
    /// An attribute value containing at least one placeholder.
    Attribute {
        /// The element carrying the attribute
        node: N,
        /// The attribute name
        name: String,
        /// The unmodified value captured at scan time
        original: String,
    },

    /// A text node containing at least one placeholder.
    Text {
        /// The text node
        node: N,
        /// The unmodified content captured at scan time
        original: String,
    },
}

/// The live collection of placeholder bindings produced by a scan.
#[derive(Debug, Clone)]
pub struct BindingTable<N: DocumentNode> {
    bindings: Vec<PlaceholderBinding<N>>,
}

impl<N: DocumentNode> BindingTable<N> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn push_attribute(&mut self, node: N, name: String, original: String) {
        self.bindings
            .push(PlaceholderBinding::Attribute { node, name, original });
    }

    pub fn push_text(&mut self, node: N, original: String) {
        self.bindings.push(PlaceholderBinding::Text { node, original });
    }

    /// Re-render every recorded binding from `data`.
    ///
    /// Each location is recomputed from its captured original and assigned
    /// whole; a missing or unrenderable field leaves that placeholder's
    /// literal token in place and is reported, without disturbing the rest
    /// of the binding. Every recorded location must still exist in the
    /// tree; externally deleted nodes are not defended against.
    pub fn render(&self, data: &DataMap) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for binding in &self.bindings {
            match binding {
                PlaceholderBinding::Attribute { node, name, original } => {
                    let value = substitute_into(original, data, &mut warnings);
                    node.set_attribute(name, &value);
                }
                PlaceholderBinding::Text { node, original } => {
                    let content = substitute_into(original, data, &mut warnings);
                    node.set_text(&content);
                }
            }
        }
        warnings
    }

    /// The recorded bindings, in scan order.
    pub fn bindings(&self) -> &[PlaceholderBinding<N>] {
        &self.bindings
    }

    /// Number of recorded bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Substitute every placeholder in `text` from `data`, returning the
/// rendered string and the anomalies encountered. Unresolved placeholders
/// keep their literal token, delimiters included.
pub fn substitute(text: &str, data: &DataMap) -> (String, Vec<Warning>) {
    let mut warnings = Vec::new();
    let rendered = substitute_into(text, data, &mut warnings);
    (rendered, warnings)
}

fn substitute_into(text: &str, data: &DataMap, warnings: &mut Vec<Warning>) -> String {
    let mut output = String::with_capacity(text.len());
    for segment in split(text) {
        match segment {
            Segment::Literal(literal) => output.push_str(literal),
            Segment::Placeholder { raw, field } => match data.resolve(field) {
                Some(value) => match stringify_value(value) {
                    Some(rendered) => output.push_str(&rendered),
                    None => {
                        report(warnings, Warning::UnrenderableField { field: field.to_string() });
                        output.push_str(raw);
                    }
                },
                None => {
                    report(warnings, Warning::MissingField { field: field.to_string() });
                    output.push_str(raw);
                }
            },
        }
    }
    output
}

/// Textual form of a scalar JSON value; `None` for arrays and objects.
fn stringify_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests;
