use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML schema {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate field id in schema: {id}")]
    DuplicateField { id: String },

    #[error("field id '{id}' is reserved for output row bookkeeping")]
    ReservedField { id: String },

    #[error("schema role '{role}' points at unknown field '{field}'")]
    UnknownRoleField { role: &'static str, field: String },

    #[error("linked field '{id}' points at unknown field '{target}'")]
    UnknownLinkTarget { id: String, target: String },

    #[error("default value '{value}' of linked field '{id}' is not one of its options")]
    DefaultNotInOptions { id: String, value: String },

    #[error("schema defines no fields")]
    Empty,
}

impl SchemaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
