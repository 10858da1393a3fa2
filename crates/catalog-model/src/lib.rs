//! Shared data model for the product catalog mapper.
//!
//! Everything that crosses a crate boundary lives here: raw input rows, the
//! target schema types, the user-defined mapping state, parent articles,
//! transformed output rows and validation findings.

#![deny(unsafe_code)]

pub mod article;
pub mod field;
pub mod mapping;
pub mod output;
pub mod row;
pub mod validation;

pub use article::ParentArticle;
pub use field::{FieldId, FieldSpec, LinkedFieldSpec, SchemaRoles, ValidatorId};
pub use mapping::{Defaults, LinkedValues, Mapping, MappingEntry};
pub use output::{BOOKKEEPING_KEYS, OutputRow};
pub use row::{CellValue, Dataset, RawRow};
pub use validation::{RowErrors, RowRef, ValidationViolation};
