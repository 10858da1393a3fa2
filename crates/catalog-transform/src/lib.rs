//! Transform engine: raw rows plus mapping state to output rows.
//!
//! [`transform`] is a pure function of its inputs. Regular rows keep dataset
//! order one-to-one; each parent article adds one row after them, in
//! creation order.

#![deny(unsafe_code)]

use tracing::debug;

use catalog_model::{
    BOOKKEEPING_KEYS, CellValue, Dataset, Defaults, LinkedValues, Mapping, OutputRow,
    ParentArticle, RawRow,
};
use catalog_schema::Schema;

/// Everything a transform pass reads.
#[derive(Debug, Clone, Copy)]
pub struct TransformInput<'a> {
    pub dataset: &'a Dataset,
    pub mapping: &'a Mapping,
    pub defaults: &'a Defaults,
    pub linked_values: &'a LinkedValues,
    pub parents: &'a [ParentArticle],
}

pub fn transform(schema: &Schema, input: &TransformInput<'_>) -> Vec<OutputRow> {
    let mut rows = Vec::with_capacity(input.dataset.len() + input.parents.len());
    for raw in &input.dataset.rows {
        let mut row = map_row(raw, input.mapping, input.defaults);
        apply_linked(schema, &mut row, input.linked_values);
        rows.push(row);
    }
    for parent in input.parents {
        rows.push(parent_row(schema, parent, input));
    }
    debug!(
        regular = input.dataset.len(),
        parents = input.parents.len(),
        "transform complete"
    );
    rows
}

/// Apply the mapping in insertion order (later entries win), then fill
/// empty fields from `defaults`.
pub fn map_row(raw: &RawRow, mapping: &Mapping, defaults: &Defaults) -> OutputRow {
    let mut row = OutputRow::new();
    for (source, target) in mapping.iter() {
        row.set(target, CellValue::from(raw.get(source)));
    }
    apply_defaults(&mut row, defaults);
    row
}

/// Fill every empty or missing field that has a default.
pub fn apply_defaults(row: &mut OutputRow, defaults: &Defaults) {
    for (field, value) in defaults {
        if !row.is_present(field) {
            row.set(field, value.as_str());
        }
    }
}

/// Write each linked field that has an entry in `linked_values`.
///
/// The linked target's value wins when it is non-empty; otherwise the
/// manual value is used. Fields are written in schema order.
pub fn apply_linked(schema: &Schema, row: &mut OutputRow, linked_values: &LinkedValues) {
    for spec in schema.list_linked_fields() {
        let Some(manual) = linked_values.get(&spec.id) else {
            continue;
        };
        let value = spec
            .linked_field
            .as_deref()
            .filter(|target| row.is_present(target))
            .map(|target| row.value(target).to_string())
            .unwrap_or_else(|| manual.clone());
        row.set(&spec.id, value);
    }
}

fn parent_row(schema: &Schema, parent: &ParentArticle, input: &TransformInput<'_>) -> OutputRow {
    let roles = &schema.roles;
    let mut row = OutputRow::new();
    row.set(&roles.identifier, parent.number.as_str());
    row.set(&roles.name, parent.display_name());
    row.is_parent = true;
    row.children = parent
        .children
        .iter()
        .map(|child| {
            let mapped = map_row(child, input.mapping, input.defaults);
            [&roles.identifier, &roles.name]
                .into_iter()
                .find(|key| mapped.is_present(key))
                .map(|key| mapped.value(key).to_string())
                .unwrap_or_default()
        })
        .collect();
    apply_linked(schema, &mut row, input.linked_values);
    row
}

/// Union of row keys in first-seen order, bookkeeping keys excluded.
pub fn output_columns(rows: &[OutputRow]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(OutputRow::keys) {
        if BOOKKEEPING_KEYS.contains(&key) || columns.iter().any(|c| c == key) {
            continue;
        }
        columns.push(key.to_string());
    }
    columns
}
