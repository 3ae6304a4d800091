//! Equality filters over documents.
//!
//! A filter is a conjunction of exact field comparisons: it matches a
//! document only when every listed field is present with an equal value.
//! An empty filter matches everything, which is how collection-wide reads
//! are expressed.

use serde_json::Value;

use crate::store::document::{Document, DocumentId, ID_FIELD};

/// Conjunction of `field == value` conditions.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Vec<(String, Value)>,
}

impl Filter {
    /// A filter with no conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on the store-assigned id.
    pub fn id(id: DocumentId) -> Self {
        Self::new().eq(ID_FIELD, id.to_string())
    }

    /// Add an exact-match condition.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((field.into(), value.into()));
        self
    }

    /// True when every condition holds.
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Document {
        Document::new()
            .with("name", "John Driver")
            .with("role", "driver")
            .with("available", true)
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&driver()));
        assert!(Filter::new().matches(&Document::new()));
    }

    #[test]
    fn single_condition_compares_exactly() {
        assert!(Filter::new().eq("role", "driver").matches(&driver()));
        assert!(!Filter::new().eq("role", "customer").matches(&driver()));
    }

    #[test]
    fn all_conditions_must_hold() {
        let filter = Filter::new().eq("role", "driver").eq("available", true);
        assert!(filter.matches(&driver()));

        let busy = driver().with("available", false);
        assert!(!filter.matches(&busy));
    }

    #[test]
    fn missing_field_never_matches() {
        let filter = Filter::new().eq("email", "john@example.com");
        assert!(!filter.matches(&driver()));
    }

    #[test]
    fn value_comparison_is_type_sensitive() {
        let doc = Document::new().with("available", true);
        assert!(!Filter::new().eq("available", "true").matches(&doc));
    }

    #[test]
    fn id_filter_matches_assigned_id() {
        let mut doc = driver();
        let id = DocumentId::generate();
        doc.set_id(id);

        assert!(Filter::id(id).matches(&doc));
        assert!(!Filter::id(DocumentId::generate()).matches(&doc));
    }
}
