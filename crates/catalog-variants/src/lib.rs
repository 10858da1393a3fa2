//! Variant handling: child selection, manufacturer auto-grouping and parent
//! articles.

#![deny(unsafe_code)]

mod error;
mod grouping;
mod manager;

pub use error::VariantError;
pub use grouping::{GroupingMode, ManufacturerGroup, group_rows};
pub use manager::{VariantEvent, VariantManager};
