//! Target schema definitions.
//!
//! These types describe the fixed catalog schema that source columns are
//! mapped onto. They are loaded once at startup and never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a target field, e.g. `gtin` or `meta_google_brand`.
pub type FieldId = String;

/// Semantic type checked by the validator library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidatorId {
    Gtin,
    Price,
    Date,
    Email,
    Url,
}

impl ValidatorId {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gtin => "GTIN",
            Self::Price => "Price",
            Self::Date => "Date",
            Self::Email => "Email",
            Self::Url => "URL",
        }
    }

    /// Example of a value that passes this validator.
    pub const fn example(&self) -> &'static str {
        match self {
            Self::Gtin => "1234567890123",
            Self::Price => "99.99",
            Self::Date => "2024-01-30",
            Self::Email => "example@domain.com",
            Self::Url => "https://example.com/image.jpg",
        }
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A regular target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub display_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<ValidatorId>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            required: false,
            validator: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: ValidatorId) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// A derived marketplace field (Google Shopping style).
///
/// When `linked_field` is set, the output value is copied from that target
/// field whenever it is non-empty; the manually entered value is used
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedFieldSpec {
    pub id: FieldId,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_field: Option<FieldId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl LinkedFieldSpec {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            linked_field: None,
            options: None,
            default_value: None,
        }
    }

    #[must_use]
    pub fn linked_to(mut self, field: impl Into<String>) -> Self {
        self.linked_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// True when `value` is acceptable for this field.
    ///
    /// Empty values are always accepted; fields without options accept
    /// anything.
    pub fn accepts(&self, value: &str) -> bool {
        if value.is_empty() {
            return true;
        }
        match &self.options {
            Some(options) => options.iter().any(|o| o == value),
            None => true,
        }
    }
}

/// Fields with a fixed meaning for parent articles and grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRoles {
    /// Field holding the article identifier (GTIN).
    pub identifier: FieldId,
    /// Field holding the article name.
    pub name: FieldId,
    /// Field holding the manufacturer article number (HAN).
    pub manufacturer: FieldId,
}

impl Default for SchemaRoles {
    fn default() -> Self {
        Self {
            identifier: "gtin".to_string(),
            name: "artikelname".to_string(),
            manufacturer: "han".to_string(),
        }
    }
}
