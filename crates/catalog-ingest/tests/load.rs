use std::io::Write;

use catalog_ingest::{IngestError, MAX_FILE_SIZE, check_file_size_with_limit, load_dataset};
use rust_xlsxwriter::Workbook;
use tempfile::{Builder, NamedTempFile};

fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn loads_csv_with_bom() {
    let file = temp_file(
        ".csv",
        "\u{feff}GTIN,HAN,Artikelname,Preis\n4006381333931,H-1,Stift,\"1,99\"\n".as_bytes(),
    );
    let data = load_dataset(file.path()).unwrap();
    assert_eq!(data.columns, vec!["GTIN", "HAN", "Artikelname", "Preis"]);
    assert_eq!(data.rows[0].get("Preis"), Some("1,99"));
}

/// Write `header` and `rows` to the first sheet; a second sheet holds noise.
fn workbook_file(header: &[&str], rows: &[(&str, f64)]) -> NamedTempFile {
    let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    let mut row = 1;
    for (name, code) in rows {
        // Row 2 stays blank.
        if row == 2 {
            row += 1;
        }
        sheet.write_string(row, 0, format!(" {name} ")).unwrap();
        sheet.write_number(row, 1, *code).unwrap();
        row += 1;
    }
    workbook
        .add_worksheet()
        .write_string(0, 0, "ignored")
        .unwrap();
    workbook.save(file.path()).unwrap();
    file
}

#[test]
fn loads_first_sheet_of_xlsx() {
    let file = workbook_file(
        &[" Artikelname ", "EAN"],
        &[("Stift", 4006381333931.0), ("Block", 12345.0)],
    );
    let data = load_dataset(file.path()).unwrap();
    assert_eq!(data.columns, vec!["Artikelname", "EAN", "GTIN"]);
    assert_eq!(data.len(), 2);
    assert_eq!(data.rows[0].get("Artikelname"), Some("Stift"));
    assert_eq!(data.rows[0].get("GTIN"), Some("4006381333931"));
    assert_eq!(data.rows[1].get("EAN"), Some("12345"));
    assert_eq!(data.rows[1].get("GTIN"), Some("0000000012345"));
}

#[test]
fn workbook_checks_match_csv() {
    let file = workbook_file(&["Name", "Name"], &[("Stift", 1.0)]);
    assert!(matches!(
        load_dataset(file.path()),
        Err(IngestError::DuplicateColumn { column, .. }) if column == "Name"
    ));

    let file = workbook_file(&["SKU", "Preis"], &[("Stift", 1.0)]);
    assert!(matches!(
        load_dataset(file.path()),
        Err(IngestError::MissingColumns { .. })
    ));

    let file = workbook_file(&["GTIN", "Name"], &[]);
    assert!(matches!(
        load_dataset(file.path()),
        Err(IngestError::EmptyData { .. })
    ));
}

#[test]
fn corrupt_workbook_is_reported() {
    let file = temp_file(".xlsx", b"PK\x03\x04");
    let err = load_dataset(file.path()).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[test]
fn other_extensions_are_rejected() {
    let file = temp_file(".txt", b"GTIN\n1\n");
    assert!(matches!(
        load_dataset(file.path()),
        Err(IngestError::InvalidExtension { .. })
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = load_dataset(std::path::Path::new("/no/such/products.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn size_limit_is_enforced() {
    let file = temp_file(".csv", b"GTIN\n4006381333931\n");
    assert!(check_file_size_with_limit(file.path(), MAX_FILE_SIZE).is_ok());
    assert!(matches!(
        check_file_size_with_limit(file.path(), 4),
        Err(IngestError::FileTooLarge { max_size: 4, .. })
    ));
}

#[test]
fn empty_file_is_rejected() {
    let file = temp_file(".csv", b"");
    assert!(load_dataset(file.path()).is_err());
}
