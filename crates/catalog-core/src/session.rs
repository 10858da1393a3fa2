use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use catalog_map::{MappingEvent, MappingStore, MappingSummary};
use catalog_model::{Dataset, OutputRow, ParentArticle, RowErrors, ValidationViolation};
use catalog_schema::Schema;
use catalog_transform::{TransformInput, output_columns, transform};
use catalog_validate::{
    ValidationSummary, find_duplicate_identifiers, validate_dataset, validation_summary,
};
use catalog_variants::{GroupingMode, VariantEvent, VariantManager};

use crate::error::SessionError;

/// Validation findings for the loaded file.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub rows: Vec<RowErrors>,
    pub duplicates: Vec<ValidationViolation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.rows.is_empty() && self.duplicates.is_empty()
    }
}

/// One mapping session over one loaded file.
///
/// The session owns the mapping store and variant manager, listens to both
/// and recomputes the preview in [`Session::process_events`].
pub struct Session {
    schema: Arc<Schema>,
    dataset: Option<Dataset>,
    store: MappingStore,
    variants: VariantManager,
    mapping_events: Receiver<MappingEvent>,
    variant_events: Receiver<VariantEvent>,
    preview: Vec<OutputRow>,
    dirty: bool,
}

impl Session {
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut store = MappingStore::new(Arc::clone(&schema));
        let mut variants = VariantManager::new();
        let mapping_events = store.subscribe();
        let variant_events = variants.subscribe();
        Self {
            schema,
            dataset: None,
            store,
            variants,
            mapping_events,
            variant_events,
            preview: Vec::new(),
            dirty: false,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut MappingStore {
        &mut self.store
    }

    pub fn variants(&self) -> &VariantManager {
        &self.variants
    }

    pub fn variants_mut(&mut self) -> &mut VariantManager {
        &mut self.variants
    }

    /// Load a file. On error the previous dataset stays in place.
    pub fn load_dataset(&mut self, path: &Path) -> Result<&Dataset, SessionError> {
        let dataset = catalog_ingest::load_dataset(path)?;
        Ok(self.set_dataset(dataset))
    }

    /// Replace the dataset. The column mapping and defaults are reset since
    /// they refer to the old headers; parent articles and linked values stay.
    pub fn set_dataset(&mut self, dataset: Dataset) -> &Dataset {
        info!(
            rows = dataset.len(),
            columns = dataset.columns.len(),
            "dataset replaced"
        );
        self.variants.load_articles(&dataset);
        self.store.clear();
        self.dirty = true;
        self.dataset.insert(dataset)
    }

    /// Drain pending change notifications and recompute the preview if
    /// anything changed. Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let handled =
            self.mapping_events.try_iter().count() + self.variant_events.try_iter().count();
        if handled > 0 || self.dirty {
            self.preview = self.transform();
            self.dirty = false;
            debug!(events = handled, rows = self.preview.len(), "preview refreshed");
        }
        handled
    }

    /// The preview as of the last [`Session::process_events`] call.
    pub fn preview(&self) -> &[OutputRow] {
        &self.preview
    }

    pub fn preview_columns(&self) -> Vec<String> {
        output_columns(&self.preview)
    }

    /// Run a transform pass over the current state.
    pub fn transform(&self) -> Vec<OutputRow> {
        let empty = Dataset::default();
        let dataset = self.dataset.as_ref().unwrap_or(&empty);
        transform(
            &self.schema,
            &TransformInput {
                dataset,
                mapping: self.store.mapping(),
                defaults: self.store.defaults(),
                linked_values: self.store.linked_values(),
                parents: self.variants.parent_articles(),
            },
        )
    }

    pub fn validate(&self) -> Result<ValidationReport, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        let mapping = self.store.mapping();
        let rows = validate_dataset(&self.schema, dataset, mapping);
        let duplicates = find_duplicate_identifiers(&self.schema, dataset, mapping);
        let summary = validation_summary(&rows);
        info!(
            failing_rows = summary.failing_rows,
            violations = summary.violations,
            duplicates = duplicates.len(),
            "validation finished"
        );
        Ok(ValidationReport {
            rows,
            duplicates,
            summary,
        })
    }

    pub fn mapping_summary(&self) -> MappingSummary {
        self.store.summary()
    }

    /// Source column currently mapped to the manufacturer role.
    pub fn manufacturer_column(&self) -> Result<String, SessionError> {
        let field = &self.schema.roles.manufacturer;
        self.store
            .mapping()
            .source_for(field)
            .map(str::to_string)
            .ok_or_else(|| SessionError::NoManufacturerColumn(field.clone()))
    }

    /// Switch to manufacturer grouping and create one parent per surfaced
    /// group, numbered `{prefix}{manufacturer id}`.
    pub fn create_parents_from_groups(
        &mut self,
        prefix: &str,
    ) -> Result<Vec<ParentArticle>, SessionError> {
        let column = self.manufacturer_column()?;
        self.variants
            .set_grouping_mode(GroupingMode::Manufacturer(column));
        let ids: Vec<String> = self
            .variants
            .groups()
            .iter()
            .map(|g| g.manufacturer_id.clone())
            .collect();
        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            self.variants.select_group(&id)?;
            created.push(
                self.variants
                    .create_parent_article(&format!("{prefix}{id}"), "")?,
            );
        }
        info!(parents = created.len(), "parents created from manufacturer groups");
        Ok(created)
    }

    /// Render the current transform result as CSV.
    pub fn export_csv_string(&self) -> Result<String, SessionError> {
        Ok(catalog_output::to_csv_string(&self.transform())?)
    }

    pub fn export_csv(&self, target: &Path) -> Result<PathBuf, SessionError> {
        Ok(catalog_output::export_csv(&self.transform(), target)?)
    }
}
