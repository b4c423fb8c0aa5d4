use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Zero-based column indices of one sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub activity: usize,
    pub recipients: usize,
    pub date: usize,
    pub status: usize,
    /// Column whose first word is the area code. May share the activity column.
    #[serde(default)]
    pub category: Option<usize>,
}

impl ColumnLayout {
    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("activity", self.activity),
            ("recipients", self.recipients),
            ("date", self.date),
            ("status", self.status),
        ];
        for (i, (a_name, a_idx)) in named.iter().enumerate() {
            for (b_name, b_idx) in &named[i + 1..] {
                if a_idx == b_idx {
                    return Err(CoreError::Config(format!(
                        "columns `{a_name}` and `{b_name}` both point at index {a_idx}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Cell text at `idx`, or `""` when the row is shorter.
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Ordered area labels plus the label used for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    pub labels: Vec<String>,
    #[serde(default = "default_catch_all")]
    pub catch_all: String,
}

pub fn default_catch_all() -> String {
    "Otros".to_string()
}

impl CategorySet {
    pub fn new(labels: Vec<String>, catch_all: impl Into<String>) -> Self {
        Self {
            labels,
            catch_all: catch_all.into(),
        }
    }

    /// Labels in display order, catch-all last.
    pub fn display_order(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.catch_all.as_str()))
    }

    /// Case-insensitive lookup of a configured label.
    pub fn find(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_uppercase();
        self.labels
            .iter()
            .find(|l| l.to_uppercase() == wanted)
            .map(String::as_str)
    }

    /// The first word of the cell, mapped to a label; unknown codes go to the catch-all.
    pub fn resolve(&self, cell: &str) -> String {
        let code = cell.split_whitespace().next().unwrap_or("");
        self.find(code).unwrap_or(self.catch_all.as_str()).to_string()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.catch_all.trim().is_empty() {
            return Err(CoreError::Config("category catch-all label is empty".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for label in &self.labels {
            if label.trim().is_empty() {
                return Err(CoreError::Config("empty category label".into()));
            }
            if label.to_uppercase() == self.catch_all.to_uppercase() {
                return Err(CoreError::Config(format!(
                    "category label `{label}` repeats the catch-all label"
                )));
            }
            if !seen.insert(label.to_uppercase()) {
                return Err(CoreError::Config(format!("duplicate category label `{label}`")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ColumnLayout {
        ColumnLayout {
            activity: 0,
            recipients: 6,
            date: 8,
            status: 14,
            category: None,
        }
    }

    #[test]
    fn validate_rejects_shared_columns() {
        let mut l = layout();
        assert!(l.validate().is_ok());
        l.status = 8;
        let err = l.validate().unwrap_err().to_string();
        assert!(err.contains("`date` and `status`"));
    }

    #[test]
    fn category_may_share_activity_column() {
        let mut l = layout();
        l.category = Some(0);
        assert!(l.validate().is_ok());
    }

    #[test]
    fn cell_pads_short_rows() {
        let row = vec!["a".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 5), "");
    }

    #[test]
    fn category_resolution() {
        let set = CategorySet::new(vec!["RM".into(), "PPQA".into()], "Otros");
        assert_eq!(set.resolve("rm Revisar requisitos"), "RM");
        assert_eq!(set.resolve("PPQA"), "PPQA");
        assert_eq!(set.resolve("XYZ algo"), "Otros");
        assert_eq!(set.resolve(""), "Otros");
        let order: Vec<_> = set.display_order().collect();
        assert_eq!(order, vec!["RM", "PPQA", "Otros"]);
    }

    #[test]
    fn category_validate_rejects_duplicates() {
        let set = CategorySet::new(vec!["RM".into(), "rm".into()], "Otros");
        assert!(set.validate().is_err());
        let set = CategorySet::new(vec!["RM".into()], " ");
        assert!(set.validate().is_err());
    }

    #[test]
    fn category_validate_rejects_label_equal_to_catch_all() {
        let set = CategorySet::new(vec!["RM".into(), "otros".into()], "Otros");
        let err = set.validate().unwrap_err().to_string();
        assert!(err.contains("repeats the catch-all"));
        assert!(CategorySet::new(vec!["RM".into()], "Otros").validate().is_ok());
    }
}
