//! Non-fatal anomaly reporting.
//!
//! Duplicate identifiers and unresolved placeholders never abort an
//! operation: the engine applies its recovery policy (last registration
//! wins, literal token stays in the output) and hands the anomaly back to
//! the caller as a [`Warning`]. Every warning is also emitted as a
//! `tracing` event so hosts with a subscriber see anomalies without
//! inspecting the returned values.

use serde::Serialize;
use std::fmt;

/// A recoverable anomaly observed during registration, scanning, or
/// rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A template marker reused an identifier already registered in the
    /// same pass. The later registration replaced the earlier one.
    DuplicateTemplate {
        /// The reused identifier
        id: String,
    },

    /// A control marker reused an identifier already recorded in the same
    /// scan. The later node replaced the earlier one.
    DuplicateControl {
        /// The reused identifier
        id: String,
    },

    /// A list-item marker reused an identifier already recorded in the
    /// same scan. The later container/template pair replaced the earlier
    /// one.
    DuplicateList {
        /// The reused identifier
        id: String,
    },

    /// A placeholder referenced a field absent from the data map. The
    /// literal token was left in the output.
    MissingField {
        /// The referenced field name
        field: String,
    },

    /// A placeholder resolved to an array or object, which has no single
    /// textual representation. The literal token was left in the output.
    UnrenderableField {
        /// The referenced field name
        field: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateTemplate { id } => {
                write!(f, "duplicate template id '{}' (last registration wins)", id)
            }
            Warning::DuplicateControl { id } => {
                write!(f, "duplicate control id '{}' (last registration wins)", id)
            }
            Warning::DuplicateList { id } => {
                write!(f, "duplicate list item id '{}' (last registration wins)", id)
            }
            Warning::MissingField { field } => {
                write!(f, "field '{}' not found in data map, placeholder left as-is", field)
            }
            Warning::UnrenderableField { field } => {
                write!(
                    f,
                    "field '{}' is an array or object and cannot be rendered, placeholder left as-is",
                    field
                )
            }
        }
    }
}

/// Record a warning: emit the tracing event and push it onto the sink.
pub(crate) fn report(sink: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{}", warning);
    sink.push(warning);
}
