//! Fuzzy column suggestions.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use serde::Serialize;

use catalog_model::FieldSpec;
use catalog_schema::Schema;

use crate::synonyms::synonyms_for;

/// Default minimum score for a suggestion.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.85;

/// Confidence level categories for suggestion quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Boundaries between confidence levels.
///
/// - Below `low`: not categorized
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceThresholds {
    pub high: f32,
    pub medium: f32,
    pub low: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.97,
            medium: 0.90,
            low: 0.80,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> Option<ConfidenceLevel> {
        if confidence >= self.high {
            Some(ConfidenceLevel::High)
        } else if confidence >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if confidence >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// A suggested `source column -> target field` assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingSuggestion {
    pub source_column: String,
    pub target_field: String,
    /// Score in `0.0..=1.0`; exact name or synonym matches score 1.0.
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionResult {
    /// Suggestions in source column order.
    pub suggestions: Vec<MappingSuggestion>,
    /// Columns without a suggestion above the threshold.
    pub unmatched_columns: Vec<String>,
}

/// Suggest one target per source column.
///
/// Each target is suggested at most once; when several columns compete for
/// it, the highest score wins and ties go to the earlier column.
pub fn suggest_mappings(
    schema: &Schema,
    columns: &[String],
    min_confidence: f32,
) -> SuggestionResult {
    struct Candidate {
        column: usize,
        field: usize,
        confidence: f32,
    }

    let fields = schema.list_fields();
    let mut candidates = Vec::new();
    for (column_idx, column) in columns.iter().enumerate() {
        let normalized = normalize_text(column);
        if normalized.is_empty() {
            continue;
        }
        for (field_idx, field) in fields.iter().enumerate() {
            let confidence = score(&normalized, field);
            if confidence >= min_confidence {
                candidates.push(Candidate {
                    column: column_idx,
                    field: field_idx,
                    confidence,
                });
            }
        }
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
            .then(a.column.cmp(&b.column))
            .then(a.field.cmp(&b.field))
    });

    let mut assigned_columns = BTreeSet::new();
    let mut assigned_fields = BTreeSet::new();
    let mut chosen = Vec::new();
    for candidate in candidates {
        if assigned_columns.contains(&candidate.column) || assigned_fields.contains(&candidate.field)
        {
            continue;
        }
        assigned_columns.insert(candidate.column);
        assigned_fields.insert(candidate.field);
        chosen.push(candidate);
    }
    chosen.sort_by_key(|c| c.column);

    let suggestions = chosen
        .into_iter()
        .map(|c| MappingSuggestion {
            source_column: columns[c.column].clone(),
            target_field: fields[c.field].id.clone(),
            confidence: c.confidence,
        })
        .collect();
    let unmatched_columns = columns
        .iter()
        .enumerate()
        .filter(|(idx, _)| !assigned_columns.contains(idx))
        .map(|(_, column)| column.clone())
        .collect();

    SuggestionResult {
        suggestions,
        unmatched_columns,
    }
}

fn score(normalized_column: &str, field: &FieldSpec) -> f32 {
    let id = normalize_text(&field.id);
    let display = normalize_text(&field.display_name);
    if normalized_column == id || normalized_column == display {
        return 1.0;
    }
    if synonyms_for(&field.id).contains(&normalized_column) {
        return 1.0;
    }

    let mut best = jaro_similarity(normalized_column.chars(), id.chars())
        .max(jaro_similarity(normalized_column.chars(), display.chars()));
    for synonym in synonyms_for(&field.id) {
        best = best.max(jaro_similarity(normalized_column.chars(), synonym.chars()));
    }
    // Scores of 1.0 are reserved for exact matches.
    (best as f32).min(0.99)
}

/// Lowercase, unify separators and collapse whitespace.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
