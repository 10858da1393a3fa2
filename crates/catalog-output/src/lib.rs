//! CSV export of transformed rows.
//!
//! The header is the union of row keys in first-seen order; parent
//! bookkeeping never becomes a column. Values are quoted only when they
//! contain a delimiter, a quote or a line break, with inner quotes doubled.
//! Lines end in `\n` and the last line has no terminator.

#![deny(unsafe_code)]

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::info;

use catalog_model::OutputRow;
use catalog_transform::output_columns;

pub use error::OutputError;

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "mapped_data.csv";

/// MIME type of the export.
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8";

/// Render rows as CSV text. No rows (or no columns) gives an empty string.
///
/// With a single column, an empty value is written as an empty line.
pub fn to_csv_string(rows: &[OutputRow]) -> Result<String, OutputError> {
    let columns = output_columns(rows);
    if rows.is_empty() || columns.is_empty() {
        return Ok(String::new());
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_record(columns.as_slice())?);
    for row in rows {
        let record: Vec<&str> = columns.iter().map(|c| row.value(c)).collect();
        lines.push(render_record(record.as_slice())?);
    }
    Ok(lines.join("\n"))
}

/// One CSV line without terminator.
fn render_record<T: AsRef<str>>(fields: &[T]) -> Result<String, OutputError> {
    // csv writes a lone empty field as `""`.
    if let [only] = fields
        && only.as_ref().is_empty()
    {
        return Ok(String::new());
    }
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields.iter().map(|field| field.as_ref().as_bytes()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Csv(e.into_error().into()))?;
    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Write the export to `target`.
///
/// When `target` is an existing directory the file is named
/// [`EXPORT_FILE_NAME`] inside it. Returns the written path.
pub fn export_csv(rows: &[OutputRow], target: &Path) -> Result<PathBuf, OutputError> {
    let path = if target.is_dir() {
        target.join(EXPORT_FILE_NAME)
    } else {
        target.to_path_buf()
    };
    ensure_parent_dir(&path)?;
    let text = to_csv_string(rows)?;
    fs::write(&path, text).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = rows.len(), "export written");
    Ok(path)
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
