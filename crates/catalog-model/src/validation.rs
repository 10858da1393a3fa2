use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::row::CellValue;

/// Row reference of a validation finding.
///
/// Serialized as the bare row number, or the string `"Multiple"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RowRef {
    /// One-based row number in the loaded file.
    Number(usize),
    /// Finding spanning several rows.
    Multiple,
}

const MULTIPLE: &str = "Multiple";

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Multiple => f.write_str(MULTIPLE),
        }
    }
}

impl Serialize for RowRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_u64(*n as u64),
            Self::Multiple => serializer.serialize_str(MULTIPLE),
        }
    }
}

impl<'de> Deserialize<'de> for RowRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(usize),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::Number(n)),
            Raw::Text(text) if text == MULTIPLE => Ok(Self::Multiple),
            Raw::Text(text) => Err(D::Error::custom(format!(
                "invalid row reference '{text}'"
            ))),
        }
    }
}

/// A single failed check. Advisory only; transformation is never blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub row: RowRef,
    /// Source column name.
    pub column: String,
    pub value: CellValue,
    pub message: String,
}

/// All violations of one row, in mapping order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowErrors {
    pub row: RowRef,
    pub errors: Vec<ValidationViolation>,
}
