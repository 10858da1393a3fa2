use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, info, warn};

use catalog_model::{Dataset, ParentArticle, RawRow};

use crate::error::VariantError;
use crate::grouping::{GroupingMode, ManufacturerGroup, group_rows};

/// Notification sent when the set of parent articles changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantEvent {
    ParentCreated { number: String, children: usize },
}

/// Holds the loaded articles, the current child selection and the parent
/// articles created so far.
#[derive(Debug, Default)]
pub struct VariantManager {
    rows: Vec<RawRow>,
    selection: Vec<usize>,
    mode: GroupingMode,
    groups: Vec<ManufacturerGroup>,
    parents: Vec<ParentArticle>,
    subscribers: Vec<Sender<VariantEvent>>,
}

impl VariantManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the article list. Selection and group view are reset; parent
    /// articles are kept.
    pub fn load_articles(&mut self, dataset: &Dataset) {
        self.rows = dataset.rows.clone();
        self.selection.clear();
        self.groups.clear();
        self.mode = GroupingMode::Manual;
        debug!(rows = self.rows.len(), "articles loaded");
    }

    pub fn articles(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn subscribe(&mut self) -> Receiver<VariantEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Add a row to the selection. Already selected rows are ignored.
    pub fn select_article(&mut self, index: usize) -> Result<(), VariantError> {
        self.check_index(index)?;
        if !self.selection.contains(&index) {
            self.selection.push(index);
        }
        Ok(())
    }

    pub fn deselect_article(&mut self, index: usize) -> Result<(), VariantError> {
        self.check_index(index)?;
        self.selection.retain(|&i| i != index);
        Ok(())
    }

    /// Selected row indices in selection order.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Variant groups by manufacturer id, read from `column`.
    pub fn group_by_manufacturer_id(&self, column: &str) -> Vec<ManufacturerGroup> {
        group_rows(&self.rows, column)
    }

    pub fn grouping_mode(&self) -> &GroupingMode {
        &self.mode
    }

    /// Groups currently surfaced by manufacturer mode.
    pub fn groups(&self) -> &[ManufacturerGroup] {
        &self.groups
    }

    /// Switch grouping mode. Both directions clear the selection; manual mode
    /// also drops the group view. Parent articles are never touched.
    pub fn set_grouping_mode(&mut self, mode: GroupingMode) {
        self.selection.clear();
        self.groups = match &mode {
            GroupingMode::Manual => Vec::new(),
            GroupingMode::Manufacturer(column) => self.group_by_manufacturer_id(column),
        };
        debug!(?mode, groups = self.groups.len(), "grouping mode changed");
        self.mode = mode;
    }

    /// Replace the selection with the members of a surfaced group.
    pub fn select_group(&mut self, manufacturer_id: &str) -> Result<(), VariantError> {
        let group = self
            .groups
            .iter()
            .find(|g| g.manufacturer_id == manufacturer_id)
            .ok_or_else(|| VariantError::UnknownGroup(manufacturer_id.to_string()))?;
        self.selection = group.rows.clone();
        Ok(())
    }

    /// Create a parent article from the current selection.
    ///
    /// Children are copied out of the loaded rows, so later reloads do not
    /// change them. The selection is cleared on success.
    pub fn create_parent_article(
        &mut self,
        number: &str,
        description: &str,
    ) -> Result<ParentArticle, VariantError> {
        let number = number.trim();
        if number.is_empty() {
            warn!("parent article rejected: empty number");
            return Err(VariantError::EmptyParentNumber);
        }
        if self.selection.is_empty() {
            warn!(number, "parent article rejected: empty selection");
            return Err(VariantError::EmptySelection);
        }

        let child_rows = std::mem::take(&mut self.selection);
        let children = child_rows
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        let parent = ParentArticle {
            number: number.to_string(),
            description: description.trim().to_string(),
            children,
            child_rows,
        };
        self.parents.push(parent.clone());
        info!(
            number,
            children = parent.children.len(),
            "parent article created"
        );

        let event = VariantEvent::ParentCreated {
            number: parent.number.clone(),
            children: parent.children.len(),
        };
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        Ok(parent)
    }

    /// Parent articles in creation order.
    pub fn parent_articles(&self) -> &[ParentArticle] {
        &self.parents
    }

    fn check_index(&self, index: usize) -> Result<(), VariantError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(VariantError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }
}
