//! Marker conventions recognized on input trees and text payloads.
//!
//! These are the attribute names and literal delimiters callers put on their
//! markup to make nodes addressable by the engine. They are part of the
//! public contract, not implementation details.

/// Attribute naming a reusable sub-tree to extract into a [`TemplateRegistry`].
///
/// [`TemplateRegistry`]: crate::template::TemplateRegistry
pub const TEMPLATE_MARKER: &str = "data-templateId";

/// Attribute naming a repeatable list-item template. The marked node is
/// detached at scan time; its parent becomes the list container.
pub const LIST_ITEM_MARKER: &str = "data-listItemId";

/// Attribute naming a single addressable live node.
pub const CONTROL_MARKER: &str = "data-controlId";

/// Literal marker opening an embedded template block inside a text payload.
pub const TEMPLATE_BEGIN: &str = "$(TemplateBegin)";

/// Literal marker closing an embedded template block inside a text payload.
pub const TEMPLATE_END: &str = "$(TemplateEnd)";
