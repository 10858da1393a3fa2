//! Common header spellings per built-in field, already normalized.

pub fn synonyms_for(field: &str) -> &'static [&'static str] {
    match field {
        "gtin" => &["ean", "ean13", "ean 13", "gtin13", "barcode", "upc"],
        "han" => &[
            "mpn",
            "hersteller artikelnummer",
            "herstellerartikelnummer",
            "manufacturer number",
            "manufacturer id",
            "artikelnummer",
            "art nr",
        ],
        "artikelname" => &["name", "produktname", "product name", "title", "bezeichnung"],
        "beschreibung" => &["description", "desc", "langtext", "text"],
        "lieferant" => &["hersteller", "brand", "marke", "supplier", "manufacturer"],
        "preis" => &["price", "vk", "vk preis", "verkaufspreis", "cost"],
        "kategorie" => &["category", "warengruppe"],
        "groesse" => &["größe", "size", "grösse"],
        "farbe" => &["color", "colour"],
        "gewicht" => &["weight"],
        "bestand" => &["stock", "lagerbestand", "menge", "quantity"],
        "bild_url" => &["bild", "image", "image url", "bild url", "picture"],
        "lieferdatum" => &["delivery date", "date", "datum"],
        "kontakt_email" => &["email", "e mail", "contact email", "kontakt"],
        _ => &[],
    }
}
