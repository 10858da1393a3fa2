//! CSV and workbook loading into a [`Dataset`].

use std::borrow::Cow;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::{debug, info, warn};

use catalog_model::{Dataset, RawRow};

use crate::error::{IngestError, Result};

/// Maximum accepted input file size (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Header of the identifier column every file must provide.
pub const GTIN_COLUMN: &str = "GTIN";

/// Accepted alternative to [`GTIN_COLUMN`].
pub const EAN_COLUMN: &str = "EAN";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Kind of input file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(IngestError::InvalidExtension {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::read(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Load a product file. Workbooks contribute their first sheet.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let kind = FileKind::from_path(path)?;
    check_file_size_with_limit(path, MAX_FILE_SIZE)?;
    let dataset = match kind {
        FileKind::Csv => {
            let bytes = std::fs::read(path).map_err(|e| IngestError::read(path, e))?;
            parse_csv_bytes(&bytes, path)?
        }
        FileKind::Xls | FileKind::Xlsx => parse_workbook(path)?,
    };
    info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns.len(),
        "file loaded"
    );
    Ok(dataset)
}

/// Parse CSV bytes; `origin` is only used in error messages.
pub fn parse_csv_bytes(bytes: &[u8], origin: &Path) -> Result<Dataset> {
    let text = decode(bytes, origin)?;
    parse_csv_text(&text, origin)
}

/// Decode file bytes to text.
///
/// UTF-8 (with or without BOM) is used as is. UTF-16 is rejected. Anything
/// else is decoded as Windows-1252, the usual export encoding of German
/// spreadsheet tools.
pub fn decode<'a>(bytes: &'a [u8], origin: &Path) -> Result<Cow<'a, str>> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: origin.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: origin.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(_) => {
            warn!(path = %origin.display(), "input is not UTF-8, decoding as Windows-1252");
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
            Ok(text)
        }
    }
}

/// Parse CSV text with a header line.
pub fn parse_csv_text(text: &str, origin: &Path) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(origin, &e))?
        .iter()
        .map(str::to_string)
        .collect();
    let records = reader.records().map(|record| {
        record
            .map(|r| r.iter().map(str::to_string).collect::<Vec<_>>())
            .map_err(|e| csv_error(origin, &e))
    });
    build_dataset(&headers, records, origin)
}

/// Read the first sheet of an `.xls`/`.xlsx` workbook; its first row is the
/// header.
pub fn parse_workbook(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, &e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyData {
            path: path.to_path_buf(),
        })?
        .map_err(|e| workbook_error(path, &e))?;
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>());
    let headers = rows.next().ok_or_else(|| IngestError::EmptyData {
        path: path.to_path_buf(),
    })?;
    build_dataset(&headers, rows.map(Ok), path)
}

/// Shared tail of CSV and workbook parsing: normalise headers and cells,
/// drop blank rows, then require the identifier column.
fn build_dataset<I>(raw_headers: &[String], records: I, origin: &Path) -> Result<Dataset>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();
    if let Some(column) = first_duplicate(&headers) {
        return Err(IngestError::DuplicateColumn {
            path: origin.to_path_buf(),
            column: column.to_string(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let cells: Vec<String> = record?.iter().map(|c| normalize_cell(c)).collect();
        if cells.iter().all(String::is_empty) {
            skipped += 1;
            continue;
        }
        let row: RawRow = headers.iter().cloned().zip(cells).collect();
        rows.push(row);
    }
    if skipped > 0 {
        debug!(skipped, "skipped empty lines");
    }
    if rows.is_empty() {
        return Err(IngestError::EmptyData {
            path: origin.to_path_buf(),
        });
    }

    let mut dataset = Dataset::new(headers, rows);
    ensure_gtin_column(&mut dataset, origin)?;
    Ok(dataset)
}

/// Require a `GTIN` column, deriving it from `EAN` when only that exists.
pub fn ensure_gtin_column(dataset: &mut Dataset, origin: &Path) -> Result<()> {
    if dataset.has_column(GTIN_COLUMN) {
        return Ok(());
    }
    if !dataset.has_column(EAN_COLUMN) {
        return Err(IngestError::MissingColumns {
            path: origin.to_path_buf(),
            columns: vec![format!("{GTIN_COLUMN} or {EAN_COLUMN}")],
        });
    }
    for row in &mut dataset.rows {
        let gtin = row.get(EAN_COLUMN).map(pad_ean).unwrap_or_default();
        row.insert(GTIN_COLUMN, gtin);
    }
    dataset.columns.push(GTIN_COLUMN.to_string());
    debug!("derived GTIN column from EAN");
    Ok(())
}

/// Left-pad an all-digit code shorter than 13 digits with zeros.
pub fn pad_ean(value: &str) -> String {
    if !value.is_empty() && value.len() < 13 && value.bytes().all(|b| b.is_ascii_digit()) {
        format!("{value:0>13}")
    } else {
        value.to_string()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

fn first_duplicate(headers: &[String]) -> Option<&str> {
    headers
        .iter()
        .enumerate()
        .find(|(idx, h)| !h.is_empty() && headers[..*idx].contains(h))
        .map(|(_, h)| h.as_str())
}

/// Numbers keep their shortest form, so `4006381333931.0` reads as
/// `4006381333931`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(number) => number.to_string(),
        other => other.to_string(),
    }
}

fn workbook_error(origin: &Path, err: &calamine::Error) -> IngestError {
    IngestError::Workbook {
        path: origin.to_path_buf(),
        message: err.to_string(),
    }
}

fn csv_error(origin: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: origin.to_path_buf(),
        line: err.position().map(csv::Position::line),
        message: err.to_string(),
    }
}
