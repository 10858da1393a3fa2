//! Transformed output rows.

use serde::{Deserialize, Serialize};

use crate::row::CellValue;

/// Keys reserved for parent bookkeeping. They never become table or export
/// columns.
pub const BOOKKEEPING_KEYS: [&str; 2] = ["isParent", "children"];

/// A transformed row, either derived from one raw row or synthesised from a
/// parent article.
///
/// Field order is the order in which keys were first written, which is what
/// previews and exports use for their column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    fields: Vec<(String, CellValue)>,
    pub is_parent: bool,
    pub children: Vec<String>,
}

impl OutputRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The text of `key`, or `""` when absent or missing.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).map_or("", CellValue::as_str)
    }

    /// True when `key` holds a non-empty value.
    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).is_some_and(CellValue::is_present)
    }

    /// Write `key`, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: impl Into<CellValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut row = OutputRow::new();
        row.set("gtin", "1");
        row.set("artikelname", "Stift");
        row.set("gtin", "2");
        let keys: Vec<_> = row.keys().collect();
        assert_eq!(keys, vec!["gtin", "artikelname"]);
        assert_eq!(row.value("gtin"), "2");
    }

    #[test]
    fn missing_cells_are_not_present() {
        let mut row = OutputRow::new();
        row.set("preis", CellValue::Missing);
        assert!(row.contains_key("preis"));
        assert!(!row.is_present("preis"));
        assert_eq!(row.value("preis"), "");
    }
}
