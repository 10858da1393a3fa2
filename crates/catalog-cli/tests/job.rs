//! Job files applied to a real session.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use catalog_cli::job::{apply_job, load_job, parse_job};
use catalog_core::Session;
use catalog_schema::Schema;
use tempfile::TempDir;

const PRODUCTS: &str = "\
EAN,Produktname,HAN,Hersteller,VK-Preis
4006381333931,Shirt S,SH-1,Acme,19.99
4006381333948,Shirt M,SH-1,Acme,19.99
4006381333955,Cap,CP-7,,9.50
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn session_with(dir: &TempDir) -> Session {
    let mut session = Session::new(Arc::new(Schema::builtin()));
    session
        .load_dataset(&write(dir, "products.csv", PRODUCTS))
        .unwrap();
    session
}

#[test]
fn explicit_mapping_defaults_and_parents() {
    let dir = TempDir::new().unwrap();
    let job = load_job(&write(
        &dir,
        "job.toml",
        r#"
[[mapping]]
source = "GTIN"
target = "gtin"

[[mapping]]
source = "Produktname"
target = "artikelname"

[[mapping]]
source = "Hersteller"
target = "lieferant"

[defaults]
lieferant = "Unbekannt"

[linked]
meta_google_condition = "new"

[[parents]]
number = "P-SHIRT"
description = "Shirt"
rows = [1, 2]
"#,
    ))
    .unwrap();

    let mut session = session_with(&dir);
    let outcome = apply_job(&job, &mut session).unwrap();
    assert_eq!(outcome.mapped, 3);
    assert_eq!(outcome.parents, 1);

    let preview = session.preview();
    assert_eq!(preview.len(), 4);
    assert_eq!(preview[2].value("lieferant"), "Unbekannt");
    assert_eq!(preview[0].value("meta_google_brand"), "Acme");
    assert_eq!(preview[2].value("meta_google_brand"), "Unbekannt");
    assert_eq!(preview[0].value("meta_google_condition"), "new");
    let parent = &preview[3];
    assert!(parent.is_parent);
    assert_eq!(parent.value("artikelname"), "Shirt");
    assert_eq!(parent.children, vec!["4006381333931", "4006381333948"]);
}

#[test]
fn auto_map_then_manufacturer_grouping() {
    let dir = TempDir::new().unwrap();
    let job = parse_job(
        r#"
auto_map = true

[grouping]
manufacturer = true
prefix = "V-"
"#,
    )
    .unwrap();

    let mut session = session_with(&dir);
    let outcome = apply_job(&job, &mut session).unwrap();
    assert!(outcome.suggested >= 3);
    assert_eq!(outcome.parents, 1);
    assert_eq!(session.manufacturer_column().unwrap(), "HAN");

    let parents = session.variants().parent_articles();
    assert_eq!(parents[0].number, "V-SH-1");
    assert_eq!(parents[0].child_rows, vec![0, 1]);
}

#[test]
fn bad_entries_report_context() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with(&dir);

    let job = parse_job("[[mapping]]\nsource = \"EAN\"\ntarget = \"nope\"").unwrap();
    let err = apply_job(&job, &mut session).unwrap_err();
    assert!(format!("{err:#}").contains("map column 'EAN'"));

    let job = parse_job("[[parents]]\nnumber = \"P\"\nrows = [0]").unwrap();
    let err = apply_job(&job, &mut session).unwrap_err();
    assert!(err.to_string().contains("row numbers start at 1"));

    let job = parse_job("[[parents]]\nnumber = \"P\"\nrows = [9]").unwrap();
    assert!(apply_job(&job, &mut session).is_err());
    assert!(session.variants().parent_articles().is_empty());
}

#[test]
fn linked_value_outside_options_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut session = session_with(&dir);
    let job = parse_job("[linked]\nmeta_google_condition = \"broken\"").unwrap();
    let err = apply_job(&job, &mut session).unwrap_err();
    assert!(format!("{err:#}").contains("meta_google_condition"));
}
