use serde::{Deserialize, Serialize};

use crate::row::RawRow;

/// A synthetic aggregate record grouping variant rows under one number.
///
/// Children are copies of the selected raw rows taken at creation time.
/// They are re-mapped on every transform pass, so mapping changes still
/// show up in the parent's child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentArticle {
    pub number: String,
    pub description: String,
    pub children: Vec<RawRow>,
    /// Zero-based dataset indices the children were taken from.
    pub child_rows: Vec<usize>,
}

impl ParentArticle {
    /// Name used when the description is empty.
    pub fn display_name(&self) -> String {
        if self.description.is_empty() {
            format!("Parent Article {}", self.number)
        } else {
            self.description.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_number() {
        let parent = ParentArticle {
            number: "P-001".to_string(),
            description: String::new(),
            children: vec![],
            child_rows: vec![],
        };
        assert_eq!(parent.display_name(), "Parent Article P-001");
    }
}
