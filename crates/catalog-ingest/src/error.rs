//! Error types for product file ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a product file. A failed load never
/// yields a partial dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file too large: {path} ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    #[error("unsupported file type '{extension}' for {path}: expected .csv, .xls or .xlsx")]
    InvalidExtension { path: PathBuf, extension: String },

    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("unsupported encoding {encoding} in {path}: save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Errors ===
    #[error("failed to parse CSV {path}{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    CsvParse {
        path: PathBuf,
        line: Option<u64>,
        message: String,
    },

    #[error("no data found in {path}")]
    EmptyData { path: PathBuf },

    #[error("missing required columns in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { path: PathBuf, column: String },
}

impl IngestError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
