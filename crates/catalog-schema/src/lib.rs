//! Schema registry for the catalog mapper.
//!
//! The [`Schema`] lists the target fields source columns can be mapped to,
//! the linked marketplace fields derived from them, and which fields carry
//! the identifier, name and manufacturer roles. It is built once (either
//! [`Schema::builtin`] or [`load_schema`]) and shared read-only afterwards.

#![deny(unsafe_code)]

mod builtin;
pub mod error;
mod loader;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use catalog_model::{BOOKKEEPING_KEYS, FieldSpec, LinkedFieldSpec, SchemaRoles};

pub use error::SchemaError;
pub use loader::{load_schema, parse_schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub roles: SchemaRoles,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub linked_fields: Vec<LinkedFieldSpec>,
}

impl Schema {
    /// Target fields in display order.
    pub fn list_fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Linked fields in display order.
    pub fn list_linked_fields(&self) -> &[LinkedFieldSpec] {
        &self.linked_fields
    }

    pub fn get_field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_linked_field(&self, id: &str) -> Option<&LinkedFieldSpec> {
        self.linked_fields.iter().find(|f| f.id == id)
    }

    /// True when `id` names a regular target field.
    pub fn is_known_target(&self, id: &str) -> bool {
        self.get_field(id).is_some()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Check internal consistency: unique ids outside the output bookkeeping
    /// keys, roles and links that point at declared fields, linked defaults
    /// inside their options.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut seen = BTreeSet::new();
        let ids = self
            .fields
            .iter()
            .map(|f| &f.id)
            .chain(self.linked_fields.iter().map(|f| &f.id));
        for id in ids {
            if BOOKKEEPING_KEYS.contains(&id.as_str()) {
                return Err(SchemaError::ReservedField { id: id.clone() });
            }
            if !seen.insert(id.as_str()) {
                return Err(SchemaError::DuplicateField { id: id.clone() });
            }
        }
        for (role, field) in [
            ("identifier", &self.roles.identifier),
            ("name", &self.roles.name),
            ("manufacturer", &self.roles.manufacturer),
        ] {
            if !self.is_known_target(field) {
                return Err(SchemaError::UnknownRoleField {
                    role,
                    field: field.clone(),
                });
            }
        }
        for linked in &self.linked_fields {
            if let Some(target) = &linked.linked_field
                && !self.is_known_target(target)
            {
                return Err(SchemaError::UnknownLinkTarget {
                    id: linked.id.clone(),
                    target: target.clone(),
                });
            }
            if let Some(value) = &linked.default_value
                && !linked.accepts(value)
            {
                return Err(SchemaError::DefaultNotInOptions {
                    id: linked.id.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}
