use serde::Serialize;

use catalog_model::RawRow;

/// Rows sharing one manufacturer id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManufacturerGroup {
    pub manufacturer_id: String,
    /// Zero-based row indices in dataset order.
    pub rows: Vec<usize>,
}

/// How children are picked for the next parent article.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupingMode {
    #[default]
    Manual,
    /// Group by the trimmed value of this source column.
    Manufacturer(String),
}

/// Group rows by the trimmed, non-empty value of `column`.
///
/// Groups keep first-seen order; only groups with two or more rows are
/// returned.
pub fn group_rows(rows: &[RawRow], column: &str) -> Vec<ManufacturerGroup> {
    let mut groups: Vec<ManufacturerGroup> = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let Some(id) = row.get(column).map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        match groups.iter_mut().find(|g| g.manufacturer_id == id) {
            Some(group) => group.rows.push(index),
            None => groups.push(ManufacturerGroup {
                manufacturer_id: id.to_string(),
                rows: vec![index],
            }),
        }
    }
    groups.retain(|g| g.rows.len() > 1);
    groups
}
