use std::io::Write;
use std::sync::Arc;

use catalog_core::{Session, SessionError};
use catalog_schema::Schema;

const PRODUCTS: &str = "\
GTIN,HAN,Artikelname,Hersteller,Preis
4006381333931,SH-1,Shirt S,Acme,19.99
4006381333948,SH-1,Shirt M,Acme,19.99
12345,TR-9,Tasse,,-3
";

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn mapped_session() -> (Session, tempfile::NamedTempFile) {
    let file = csv_file(PRODUCTS);
    let mut session = Session::new(Arc::new(Schema::builtin()));
    session.load_dataset(file.path()).unwrap();
    let store = session.store_mut();
    store.set_column_target("GTIN", Some("gtin")).unwrap();
    store.set_column_target("HAN", Some("han")).unwrap();
    store.set_column_target("Artikelname", Some("artikelname")).unwrap();
    store.set_column_target("Hersteller", Some("lieferant")).unwrap();
    store.set_column_target("Preis", Some("preis")).unwrap();
    (session, file)
}

#[test]
fn preview_follows_store_changes() {
    let (mut session, _file) = mapped_session();
    assert!(session.process_events() > 0);
    assert_eq!(session.preview().len(), 3);
    assert_eq!(session.preview()[0].value("meta_google_brand"), "Acme");

    session
        .store_mut()
        .set_linked_value("meta_google_brand", "NoName")
        .unwrap();
    session.process_events();
    assert_eq!(session.preview()[2].value("meta_google_brand"), "NoName");
    assert_eq!(session.process_events(), 0);
}

#[test]
fn failed_load_keeps_previous_dataset() {
    let (mut session, _file) = mapped_session();
    let bad = csv_file("SKU,Name\n1,a\n");
    let err = session.load_dataset(bad.path()).unwrap_err();
    assert!(matches!(err, SessionError::Ingest(_)));
    assert_eq!(session.dataset().map(|d| d.len()), Some(3));
    assert_eq!(session.store().mapping().len(), 5);
}

#[test]
fn parent_creation_adds_one_preview_row() {
    let (mut session, _file) = mapped_session();
    session.process_events();
    let variants = session.variants_mut();
    assert!(variants.create_parent_article("P-001", "").is_err());
    variants.select_article(0).unwrap();
    variants.select_article(1).unwrap();
    variants.create_parent_article("P-001", "").unwrap();

    session.process_events();
    let preview = session.preview();
    assert_eq!(preview.len(), 4);
    assert!(preview[3].is_parent);
    assert_eq!(preview[3].value("gtin"), "P-001");
    assert_eq!(preview[3].children, vec!["4006381333931", "4006381333948"]);
    assert!(!session.preview_columns().iter().any(|c| c == "isParent"));
}

#[test]
fn manufacturer_groups_become_parents() {
    let (mut session, _file) = mapped_session();
    let parents = session.create_parents_from_groups("P-").unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].number, "P-SH-1");
    assert_eq!(parents[0].child_rows, vec![0, 1]);
}

#[test]
fn grouping_requires_a_manufacturer_column() {
    let file = csv_file(PRODUCTS);
    let mut session = Session::new(Arc::new(Schema::builtin()));
    session.load_dataset(file.path()).unwrap();
    assert!(matches!(
        session.create_parents_from_groups("P-"),
        Err(SessionError::NoManufacturerColumn(_))
    ));
}

#[test]
fn validation_and_export() {
    let (session, _file) = mapped_session();
    let report = session.validate().unwrap();
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.summary.violations, 2);
    assert!(report.duplicates.is_empty());

    let csv = session.export_csv_string().unwrap();
    let header = csv.lines().next().unwrap();
    assert!(header.starts_with("gtin,han,artikelname,lieferant,preis,meta_google_brand"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn validation_needs_a_dataset() {
    let session = Session::new(Arc::new(Schema::builtin()));
    assert!(matches!(session.validate(), Err(SessionError::NoDataset)));
}
