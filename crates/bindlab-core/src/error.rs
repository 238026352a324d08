use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    // Registry errors
    #[error("TEMPLATE_NOT_FOUND: template '{0}' is not registered")]
    TemplateNotFound(String),

    #[error("SOURCE_MARKERS_INVALID: {0}")]
    SourceMarkers(String),

    #[error("FRAGMENT_PARSE_FAILED: {0}")]
    FragmentParse(String),

    // Scan context errors
    #[error("CONTROL_NOT_FOUND: control '{0}' is not in the scanned subtree")]
    ControlNotFound(String),

    #[error("LIST_NOT_FOUND: list '{0}' is not in the scanned subtree")]
    ListNotFound(String),
}

pub type Result<T> = std::result::Result<T, BindError>;
