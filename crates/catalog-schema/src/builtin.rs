use catalog_model::{FieldSpec, LinkedFieldSpec, SchemaRoles, ValidatorId};

use crate::Schema;

impl Schema {
    /// The default product catalog schema.
    pub fn builtin() -> Self {
        let fields = vec![
            FieldSpec::new("gtin", "GTIN")
                .required()
                .with_validator(ValidatorId::Gtin),
            FieldSpec::new("han", "Herstellerartikelnummer (HAN)").required(),
            FieldSpec::new("artikelname", "Artikelname").required(),
            FieldSpec::new("beschreibung", "Beschreibung"),
            FieldSpec::new("lieferant", "Lieferant"),
            FieldSpec::new("preis", "Preis")
                .required()
                .with_validator(ValidatorId::Price),
            FieldSpec::new("kategorie", "Kategorie"),
            FieldSpec::new("groesse", "Größe"),
            FieldSpec::new("farbe", "Farbe"),
            FieldSpec::new("gewicht", "Gewicht"),
            FieldSpec::new("bestand", "Bestand"),
            FieldSpec::new("bild_url", "Bild-URL").with_validator(ValidatorId::Url),
            FieldSpec::new("lieferdatum", "Lieferdatum").with_validator(ValidatorId::Date),
            FieldSpec::new("kontakt_email", "Kontakt E-Mail").with_validator(ValidatorId::Email),
        ];

        let linked_fields = vec![
            LinkedFieldSpec::new("meta_google_brand", "Google Brand").linked_to("lieferant"),
            LinkedFieldSpec::new("meta_google_sku", "Google SKU").linked_to("han"),
            LinkedFieldSpec::new("meta_google_gtin", "Google GTIN").linked_to("gtin"),
            LinkedFieldSpec::new("meta_google_condition", "Google Condition")
                .with_options(["new", "refurbished", "used"])
                .with_default("new"),
            LinkedFieldSpec::new("meta_google_category", "Google Product Category"),
            LinkedFieldSpec::new("meta_google_gender", "Google Gender")
                .with_options(["male", "female", "unisex"]),
            LinkedFieldSpec::new("meta_google_age_group", "Google Age Group")
                .with_options(["newborn", "infant", "toddler", "kids", "adult"]),
        ];

        Self {
            roles: SchemaRoles::default(),
            fields,
            linked_fields,
        }
    }
}
