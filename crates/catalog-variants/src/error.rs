/// Operator errors of the variant engine. State is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError {
    #[error("parent article number is required")]
    EmptyParentNumber,

    #[error("no child articles selected")]
    EmptySelection,

    #[error("row {index} is out of range (dataset has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("no variant group for manufacturer id '{0}'")]
    UnknownGroup(String),
}
