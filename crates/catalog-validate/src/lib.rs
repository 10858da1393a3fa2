//! Validation for the catalog mapper.
//!
//! [`validators`] holds the per-value checks keyed by [`ValidatorId`];
//! [`dataset`] applies them to a loaded dataset through the current mapping.
//! Findings are advisory and never block a transform or export.

#![deny(unsafe_code)]

pub mod dataset;
pub mod validators;

pub use catalog_model::ValidatorId;
pub use dataset::{
    ValidationSummary, find_duplicate_identifiers, validate_dataset, validation_summary,
};
pub use validators::{ValidationOutcome, validate};
