//! Coverage and exclusion terms
//!
//! Both are keyed by a policy-type label such as "Hospitalization" or
//! "Dental". Coverage maps each label to named coverage items with free-text
//! terms; exclusions map each label to an ordered list of clauses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use core_kernel::FieldError;

/// Coverage items per policy-type label
///
/// ```json
/// { "Hospitalization": { "Room": "Up to 5000/day", "ICU": "Covered in full" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageDetails(BTreeMap<String, BTreeMap<String, String>>);

impl CoverageDetails {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the terms of one coverage item
    pub fn with_item(
        mut self,
        label: impl Into<String>,
        item: impl Into<String>,
        terms: impl Into<String>,
    ) -> Self {
        self.0
            .entry(label.into())
            .or_default()
            .insert(item.into(), terms.into());
        self
    }

    /// Policy-type labels in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Terms for a coverage item, if present
    pub fn terms(&self, label: &str, item: &str) -> Option<&str> {
        self.0.get(label)?.get(item).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn check(&self, errors: &mut Vec<FieldError>) {
        for (label, items) in &self.0 {
            if label.trim().is_empty() {
                errors.push(FieldError::new("coverage_details", "policy-type label may not be blank"));
            }
            if items.keys().any(|item| item.trim().is_empty()) {
                errors.push(FieldError::new(
                    "coverage_details",
                    format!("coverage item name under '{}' may not be blank", label),
                ));
            }
        }
    }
}

/// Exclusion clauses per policy-type label, in the order they were given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exclusions(BTreeMap<String, Vec<String>>);

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause under a label
    pub fn with_clause(mut self, label: impl Into<String>, clause: impl Into<String>) -> Self {
        self.0.entry(label.into()).or_default().push(clause.into());
        self
    }

    /// Clauses for a label; empty when the label is absent
    pub fn clauses(&self, label: &str) -> &[String] {
        self.0.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn check(&self, errors: &mut Vec<FieldError>) {
        if self.0.keys().any(|label| label.trim().is_empty()) {
            errors.push(FieldError::new("exclusions", "policy-type label may not be blank"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_json_shape() {
        let coverage = CoverageDetails::new()
            .with_item("Hospitalization", "Room", "Up to 5000/day")
            .with_item("Hospitalization", "ICU", "Covered in full");

        let json = serde_json::to_value(&coverage).unwrap();
        assert_eq!(json["Hospitalization"]["ICU"], "Covered in full");
        assert_eq!(coverage.terms("Hospitalization", "Room"), Some("Up to 5000/day"));
        assert_eq!(coverage.terms("Dental", "Room"), None);
    }

    #[test]
    fn test_exclusions_keep_clause_order() {
        let exclusions = Exclusions::new()
            .with_clause("Hospitalization", "Cosmetic surgery")
            .with_clause("Hospitalization", "Pre-existing conditions");

        assert_eq!(
            exclusions.clauses("Hospitalization"),
            &["Cosmetic surgery".to_string(), "Pre-existing conditions".to_string()]
        );
        assert!(exclusions.clauses("Dental").is_empty());
    }

    #[test]
    fn test_blank_label_is_reported() {
        let coverage = CoverageDetails::new().with_item(" ", "Room", "Covered");
        let mut errors = Vec::new();
        coverage.check(&mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "coverage_details");
    }
}
