//! Job files: the mapping decisions for one run, in TOML.
//!
//! ```toml
//! auto_map = true
//! min_confidence = 0.85
//!
//! [[mapping]]
//! source = "EAN"
//! target = "gtin"
//!
//! [defaults]
//! preis = "0.00"
//!
//! [linked]
//! meta_google_condition = "new"
//!
//! [[parents]]
//! number = "P-001"
//! description = "Shirt"
//! rows = [1, 2, 3]
//!
//! [grouping]
//! manufacturer = true
//! prefix = "P-"
//!
//! [proxy]
//! upstream_url = "https://api.example.com/v1/lookup"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, warn};

use catalog_core::Session;
use catalog_map::{DEFAULT_MIN_CONFIDENCE, suggest_mappings};
use catalog_proxy::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Job {
    /// Apply fuzzy suggestions before the explicit mapping.
    pub auto_map: bool,
    pub min_confidence: f32,
    pub mapping: Vec<ColumnMapping>,
    pub defaults: BTreeMap<String, String>,
    pub linked: BTreeMap<String, String>,
    pub parents: Vec<ParentSpec>,
    pub grouping: Option<GroupingSpec>,
    pub proxy: ProxyConfig,
}

impl Default for Job {
    fn default() -> Self {
        Self {
            auto_map: false,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            mapping: Vec::new(),
            defaults: BTreeMap::new(),
            linked: BTreeMap::new(),
            parents: Vec::new(),
            grouping: None,
            proxy: ProxyConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    pub source: String,
    /// Target field id; omit to unmap a suggested column.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParentSpec {
    pub number: String,
    #[serde(default)]
    pub description: String,
    /// One-based row numbers, as shown in validation reports.
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupingSpec {
    /// One parent per manufacturer group with two or more rows.
    pub manufacturer: bool,
    pub prefix: String,
}

impl Default for GroupingSpec {
    fn default() -> Self {
        Self {
            manufacturer: false,
            prefix: "P-".to_string(),
        }
    }
}

/// What [`apply_job`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOutcome {
    pub suggested: usize,
    pub mapped: usize,
    pub defaults: usize,
    pub linked: usize,
    pub parents: usize,
}

pub fn load_job(path: &Path) -> Result<Job> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read job file {}", path.display()))?;
    parse_job(&contents).with_context(|| format!("parse job file {}", path.display()))
}

pub fn parse_job(contents: &str) -> Result<Job> {
    let job: Job = toml::from_str(contents)?;
    if !(0.0..=1.0).contains(&job.min_confidence) {
        bail!("min_confidence must be between 0 and 1, got {}", job.min_confidence);
    }
    Ok(job)
}

/// Apply a job to a session with a loaded file, in file order: suggestions,
/// explicit mapping, defaults, linked values, explicit parents, manufacturer
/// grouping. Later writes win. The preview is refreshed at the end.
pub fn apply_job(job: &Job, session: &mut Session) -> Result<JobOutcome> {
    let columns = session
        .dataset()
        .map(|d| d.columns.clone())
        .context("no file loaded")?;
    let mut outcome = JobOutcome::default();

    if job.auto_map {
        let result = suggest_mappings(session.schema(), &columns, job.min_confidence);
        outcome.suggested = session.store_mut().apply_suggestions(&result.suggestions)?;
    }

    for entry in &job.mapping {
        if !columns.contains(&entry.source) {
            warn!(source = %entry.source, "mapped column is not in the file");
        }
        session
            .store_mut()
            .set_column_target(&entry.source, entry.target.as_deref())
            .with_context(|| format!("map column '{}'", entry.source))?;
        outcome.mapped += 1;
    }

    for (field, value) in &job.defaults {
        session
            .store_mut()
            .set_default(field, Some(value))
            .with_context(|| format!("default for '{field}'"))?;
        outcome.defaults += 1;
    }

    for (field, value) in &job.linked {
        session
            .store_mut()
            .set_linked_value(field, value)
            .with_context(|| format!("linked value for '{field}'"))?;
        outcome.linked += 1;
    }

    for parent in &job.parents {
        let variants = session.variants_mut();
        for &row in &parent.rows {
            let Some(index) = row.checked_sub(1) else {
                bail!("parent '{}': row numbers start at 1", parent.number);
            };
            variants
                .select_article(index)
                .with_context(|| format!("parent '{}'", parent.number))?;
        }
        variants
            .create_parent_article(&parent.number, &parent.description)
            .with_context(|| format!("parent '{}'", parent.number))?;
        outcome.parents += 1;
    }

    if let Some(grouping) = job.grouping.as_ref().filter(|g| g.manufacturer) {
        outcome.parents += session.create_parents_from_groups(&grouping.prefix)?.len();
    }

    session.process_events();
    info!(
        suggested = outcome.suggested,
        mapped = outcome.mapped,
        defaults = outcome.defaults,
        linked = outcome.linked,
        parents = outcome.parents,
        "job applied"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_job_uses_defaults() {
        let job = parse_job("").unwrap();
        assert_eq!(job, Job::default());
        assert!((job.min_confidence - DEFAULT_MIN_CONFIDENCE).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_job("automap = true").is_err());
        assert!(parse_job("[[mapping]]\nsource = \"A\"\ntarget = \"gtin\"\nextra = 1").is_err());
    }

    #[test]
    fn confidence_out_of_range_is_rejected() {
        let err = parse_job("min_confidence = 1.5").unwrap_err();
        assert!(err.to_string().contains("between 0 and 1"));
    }

    #[test]
    fn grouping_prefix_defaults_to_p() {
        let job = parse_job("[grouping]\nmanufacturer = true").unwrap();
        assert_eq!(
            job.grouping,
            Some(GroupingSpec {
                manufacturer: true,
                prefix: "P-".to_string()
            })
        );
    }
}
