//! Product file ingestion.
//!
//! Loads a CSV file or the first sheet of an Excel workbook into a
//! [`catalog_model::Dataset`]: size and extension checks, encoding
//! detection, header normalization and the GTIN/EAN column requirement.
//! Loading is all-or-nothing.

#![deny(unsafe_code)]

pub mod error;
mod reader;

pub use error::{IngestError, Result};
pub use reader::{
    EAN_COLUMN, FileKind, GTIN_COLUMN, MAX_FILE_SIZE, check_file_size_with_limit, decode,
    ensure_gtin_column, load_dataset, pad_ean, parse_csv_bytes, parse_csv_text,
    parse_workbook,
};
