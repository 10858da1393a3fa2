//! Mapping state for the catalog mapper.
//!
//! [`MappingStore`] owns the column mapping, defaults and linked values and
//! notifies subscribers of every change. [`suggest_mappings`] proposes
//! assignments from header names.

#![deny(unsafe_code)]

mod engine;
mod error;
mod store;
mod synonyms;

pub use engine::{
    ConfidenceLevel, ConfidenceThresholds, DEFAULT_MIN_CONFIDENCE, MappingSuggestion,
    SuggestionResult, normalize_text, suggest_mappings,
};
pub use error::MappingError;
pub use store::{MappingEvent, MappingStore, MappingSummary};
