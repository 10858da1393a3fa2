use std::path::Path;

use crate::Schema;
use crate::error::SchemaError;

/// Load and check a schema from a TOML file.
///
/// ```toml
/// [roles]
/// identifier = "gtin"
/// name = "artikelname"
/// manufacturer = "han"
///
/// [[fields]]
/// id = "gtin"
/// display_name = "GTIN"
/// required = true
/// validator = "gtin"
///
/// [[linked_fields]]
/// id = "meta_google_brand"
/// display_name = "Google Brand"
/// linked_field = "lieferant"
/// ```
pub fn load_schema(path: &Path) -> Result<Schema, SchemaError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
    parse_schema(&contents, path)
}

/// Parse and check schema TOML; `origin` is only used in error messages.
pub fn parse_schema(contents: &str, origin: &Path) -> Result<Schema, SchemaError> {
    let schema: Schema = toml::from_str(contents).map_err(|e| SchemaError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;
    schema.validate()?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
[roles]
identifier = "ean"
name = "title"
manufacturer = "mpn"

[[fields]]
id = "ean"
display_name = "EAN"
required = true
validator = "gtin"

[[fields]]
id = "title"
display_name = "Title"

[[fields]]
id = "mpn"
display_name = "MPN"

[[linked_fields]]
id = "meta_google_sku"
display_name = "Google SKU"
linked_field = "mpn"
"#;

    #[test]
    fn loads_schema_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.roles.identifier, "ean");
        assert_eq!(schema.list_fields().len(), 3);
        assert_eq!(schema.list_linked_fields().len(), 1);
        assert!(schema.get_field("ean").unwrap().required);
    }

    #[test]
    fn roles_default_to_builtin_names() {
        let err = parse_schema(
            r#"
[[fields]]
id = "sku"
display_name = "SKU"
"#,
            Path::new("inline.toml"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownRoleField {
                role: "identifier",
                ..
            }
        ));
    }

    #[test]
    fn unknown_validator_is_a_toml_error() {
        let err = load_schema_str("[[fields]]\nid = \"x\"\ndisplay_name = \"X\"\nvalidator = \"iban\"\n");
        assert!(matches!(err, Err(SchemaError::Toml { .. })));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_schema(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    fn load_schema_str(contents: &str) -> Result<Schema, SchemaError> {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        load_schema(file.path())
    }
}
