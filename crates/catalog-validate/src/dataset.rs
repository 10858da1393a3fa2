//! Dataset-level validation against the current mapping.

use std::collections::BTreeMap;

use tracing::debug;

use catalog_model::{CellValue, Dataset, Mapping, RowErrors, RowRef, ValidationViolation};
use catalog_schema::Schema;

use crate::validators::validate;

/// Validate every mapped cell that targets a field with a validator.
///
/// Rows are numbered from 1. Within a row, violations follow mapping order;
/// rows without violations are omitted. A mapped column missing from a row
/// is validated as an empty string.
pub fn validate_dataset(schema: &Schema, dataset: &Dataset, mapping: &Mapping) -> Vec<RowErrors> {
    let checks: Vec<_> = mapping
        .iter()
        .filter_map(|(source, target)| {
            let validator = schema.get_field(target)?.validator?;
            Some((source, validator))
        })
        .collect();
    if checks.is_empty() {
        return Vec::new();
    }

    let mut report = Vec::new();
    for (index, row) in dataset.rows.iter().enumerate() {
        let mut errors = Vec::new();
        for &(source, validator) in &checks {
            let value = CellValue::from(row.get(source));
            let outcome = validate(validator, value.as_str());
            if !outcome.valid {
                errors.push(ValidationViolation {
                    row: RowRef::Number(index + 1),
                    column: source.to_string(),
                    value,
                    message: outcome.message.unwrap_or_default(),
                });
            }
        }
        if !errors.is_empty() {
            report.push(RowErrors {
                row: RowRef::Number(index + 1),
                errors,
            });
        }
    }
    debug!(
        rows = dataset.len(),
        failing_rows = report.len(),
        "dataset validated"
    );
    report
}

/// Identifier values shared by more than one row.
///
/// Yields one `RowRef::Multiple` violation per duplicated value, in the order
/// the value was first seen. Empty identifiers are ignored.
pub fn find_duplicate_identifiers(
    schema: &Schema,
    dataset: &Dataset,
    mapping: &Mapping,
) -> Vec<ValidationViolation> {
    let Some(source) = mapping.source_for(&schema.roles.identifier) else {
        return Vec::new();
    };

    let mut order: Vec<&str> = Vec::new();
    let mut rows: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, row) in dataset.rows.iter().enumerate() {
        let Some(value) = row.get(source).map(str::trim).filter(|v| !v.is_empty()) else {
            continue;
        };
        let entry = rows.entry(value).or_default();
        if entry.is_empty() {
            order.push(value);
        }
        entry.push(index + 1);
    }

    order
        .into_iter()
        .filter_map(|value| {
            let hits = rows.get(value).filter(|hits| hits.len() > 1)?;
            let listed: Vec<String> = hits.iter().map(ToString::to_string).collect();
            Some(ValidationViolation {
                row: RowRef::Multiple,
                column: source.to_string(),
                value: CellValue::text(value),
                message: format!("Duplicate value in rows {}", listed.join(", ")),
            })
        })
        .collect()
}

/// Violation counts of a validation report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub failing_rows: usize,
    pub violations: usize,
    /// Violations per source column, sorted by column name.
    pub by_column: BTreeMap<String, usize>,
}

impl ValidationSummary {
    pub fn is_clean(&self) -> bool {
        self.violations == 0
    }
}

pub fn validation_summary(report: &[RowErrors]) -> ValidationSummary {
    let mut summary = ValidationSummary {
        failing_rows: report.len(),
        ..ValidationSummary::default()
    };
    for violation in report.iter().flat_map(|row| &row.errors) {
        summary.violations += 1;
        *summary.by_column.entry(violation.column.clone()).or_default() += 1;
    }
    summary
}
