//! Mapping store: the single source of truth for the user's mapping state.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::Serialize;
use tracing::debug;

use catalog_model::{Defaults, FieldId, LinkedValues, Mapping};
use catalog_schema::Schema;

use crate::engine::MappingSuggestion;
use crate::error::MappingError;

/// Change notification sent after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingEvent {
    ColumnMapped {
        source: String,
        target: Option<FieldId>,
    },
    DefaultChanged {
        field: FieldId,
        value: Option<String>,
    },
    LinkedValueChanged {
        field: FieldId,
        value: String,
    },
    Cleared,
}

/// Holds the column mapping, per-field defaults and linked-field values.
#[derive(Debug)]
pub struct MappingStore {
    schema: Arc<Schema>,
    mapping: Mapping,
    defaults: Defaults,
    linked_values: LinkedValues,
    subscribers: Vec<Sender<MappingEvent>>,
}

impl MappingStore {
    /// Create an empty store; linked values start at their schema defaults.
    pub fn new(schema: Arc<Schema>) -> Self {
        let linked_values = schema
            .list_linked_fields()
            .iter()
            .map(|f| (f.id.clone(), f.default_value.clone().unwrap_or_default()))
            .collect();
        Self {
            schema,
            mapping: Mapping::new(),
            defaults: Defaults::new(),
            linked_values,
            subscribers: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn linked_values(&self) -> &LinkedValues {
        &self.linked_values
    }

    /// Register a subscriber. Events are delivered synchronously, in order.
    pub fn subscribe(&mut self) -> Receiver<MappingEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Map `source` to `target`, or unmap it with `None`.
    pub fn set_column_target(
        &mut self,
        source: &str,
        target: Option<&str>,
    ) -> Result<(), MappingError> {
        match target {
            Some(target) => {
                if !self.schema.is_known_target(target) {
                    return Err(MappingError::UnknownField(target.to_string()));
                }
                let previous = self.mapping.set(source, target);
                debug!(source, target, ?previous, "column mapped");
            }
            None => {
                let previous = self.mapping.remove(source);
                debug!(source, ?previous, "column unmapped");
            }
        }
        self.notify(MappingEvent::ColumnMapped {
            source: source.to_string(),
            target: target.map(str::to_string),
        });
        Ok(())
    }

    /// Set the fallback for `field`; `None` or an empty value removes it.
    pub fn set_default(&mut self, field: &str, value: Option<&str>) -> Result<(), MappingError> {
        if !self.schema.is_known_target(field) {
            return Err(MappingError::UnknownField(field.to_string()));
        }
        let value = value.filter(|v| !v.is_empty()).map(str::to_string);
        match &value {
            Some(v) => {
                self.defaults.insert(field.to_string(), v.clone());
            }
            None => {
                self.defaults.remove(field);
            }
        }
        debug!(field, has_value = value.is_some(), "default changed");
        self.notify(MappingEvent::DefaultChanged {
            field: field.to_string(),
            value,
        });
        Ok(())
    }

    /// Set the manual value of a linked field.
    pub fn set_linked_value(&mut self, field: &str, value: &str) -> Result<(), MappingError> {
        let spec = self
            .schema
            .get_linked_field(field)
            .ok_or_else(|| MappingError::UnknownLinkedField(field.to_string()))?;
        if !spec.accepts(value) {
            return Err(MappingError::InvalidOption {
                field: field.to_string(),
                value: value.to_string(),
                options: spec.options.clone().unwrap_or_default(),
            });
        }
        self.linked_values
            .insert(field.to_string(), value.to_string());
        debug!(field, "linked value changed");
        self.notify(MappingEvent::LinkedValueChanged {
            field: field.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    /// Forget the column mapping and defaults. Linked values are kept.
    pub fn clear(&mut self) {
        self.mapping.clear();
        self.defaults.clear();
        self.notify(MappingEvent::Cleared);
    }

    /// Write suggestions through [`Self::set_column_target`].
    ///
    /// Returns the number of suggestions applied.
    pub fn apply_suggestions(
        &mut self,
        suggestions: &[MappingSuggestion],
    ) -> Result<usize, MappingError> {
        for suggestion in suggestions {
            self.set_column_target(&suggestion.source_column, Some(&suggestion.target_field))?;
        }
        Ok(suggestions.len())
    }

    /// Coverage counts for the current state.
    pub fn summary(&self) -> MappingSummary {
        let mapped = self
            .schema
            .list_fields()
            .iter()
            .filter(|f| self.mapping.is_mapped(&f.id))
            .count();
        let mut required_total = 0;
        let mut required_covered = 0;
        let mut missing_required = Vec::new();
        for field in self.schema.required_fields() {
            required_total += 1;
            if self.mapping.is_mapped(&field.id) || self.defaults.contains_key(&field.id) {
                required_covered += 1;
            } else {
                missing_required.push(field.id.clone());
            }
        }
        MappingSummary {
            total_fields: self.schema.list_fields().len(),
            mapped,
            defaulted: self.defaults.len(),
            required_total,
            required_covered,
            missing_required,
        }
    }

    fn notify(&mut self, event: MappingEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Summary of mapping coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Number of target fields in the schema.
    pub total_fields: usize,
    /// Target fields with at least one source column.
    pub mapped: usize,
    /// Target fields with a default value.
    pub defaulted: usize,
    pub required_total: usize,
    /// Required fields that are mapped or defaulted.
    pub required_covered: usize,
    pub missing_required: Vec<FieldId>,
}

impl MappingSummary {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MappingStore {
        MappingStore::new(Arc::new(Schema::builtin()))
    }

    #[test]
    fn linked_values_start_at_schema_defaults() {
        let store = store();
        assert_eq!(
            store.linked_values().get("meta_google_condition").map(String::as_str),
            Some("new")
        );
        assert_eq!(
            store.linked_values().get("meta_google_brand").map(String::as_str),
            Some("")
        );
    }

    #[test]
    fn unknown_target_is_rejected_without_event() {
        let mut store = store();
        let rx = store.subscribe();
        let err = store.set_column_target("Foo", Some("nope")).unwrap_err();
        assert_eq!(err, MappingError::UnknownField("nope".to_string()));
        assert!(store.mapping().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn reassigning_a_column_keeps_its_position() {
        let mut store = store();
        store.set_column_target("A", Some("gtin")).unwrap();
        store.set_column_target("B", Some("han")).unwrap();
        store.set_column_target("A", Some("artikelname")).unwrap();
        let entries: Vec<_> = store.mapping().iter().collect();
        assert_eq!(entries, vec![("A", "artikelname"), ("B", "han")]);

        store.set_column_target("A", None).unwrap();
        assert_eq!(store.mapping().len(), 1);
    }

    #[test]
    fn every_mutation_notifies_subscribers() {
        let mut store = store();
        let rx = store.subscribe();
        store.set_column_target("EAN", Some("gtin")).unwrap();
        store.set_default("preis", Some("0")).unwrap();
        store.set_linked_value("meta_google_gender", "unisex").unwrap();
        store.clear();

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            MappingEvent::ColumnMapped {
                source: "EAN".to_string(),
                target: Some("gtin".to_string())
            }
        );
        assert_eq!(events[3], MappingEvent::Cleared);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut store = store();
        drop(store.subscribe());
        let rx = store.subscribe();
        store.set_default("farbe", Some("rot")).unwrap();
        assert_eq!(store.subscribers.len(), 1);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn empty_default_removes_it() {
        let mut store = store();
        store.set_default("farbe", Some("rot")).unwrap();
        store.set_default("farbe", Some("")).unwrap();
        assert!(store.defaults().is_empty());
        assert!(store.set_default("meta_google_brand", Some("x")).is_err());
    }

    #[test]
    fn linked_value_outside_options_is_rejected() {
        let mut store = store();
        let err = store
            .set_linked_value("meta_google_condition", "broken")
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidOption { .. }));
        assert_eq!(
            store.linked_values().get("meta_google_condition").map(String::as_str),
            Some("new")
        );
        store.set_linked_value("meta_google_condition", "").unwrap();
        assert!(matches!(
            store.set_linked_value("gtin", "x"),
            Err(MappingError::UnknownLinkedField(_))
        ));
    }

    #[test]
    fn summary_counts_defaults_as_coverage() {
        let mut store = store();
        store.set_column_target("EAN", Some("gtin")).unwrap();
        store.set_column_target("HAN", Some("han")).unwrap();
        store.set_default("preis", Some("0")).unwrap();

        let summary = store.summary();
        assert_eq!(summary.mapped, 2);
        assert_eq!(summary.defaulted, 1);
        assert_eq!(summary.required_total, 4);
        assert_eq!(summary.required_covered, 3);
        assert_eq!(summary.missing_required, vec!["artikelname".to_string()]);
        assert!(!summary.is_complete());
    }
}
