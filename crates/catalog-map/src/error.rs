//! Error types for mapping operations.

/// Errors from mapping store mutations. A failed call leaves the store
/// unchanged and sends no event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("unknown target field: {0}")]
    UnknownField(String),

    #[error("unknown linked field: {0}")]
    UnknownLinkedField(String),

    #[error("'{value}' is not a valid option for {field} (expected one of: {})", .options.join(", "))]
    InvalidOption {
        field: String,
        value: String,
        options: Vec<String>,
    },
}
