//! Documents and their identifiers.
//!
//! # Responsibilities
//! - Represent one stored record as a JSON object
//! - Carry the store-assigned id under a reserved key
//! - Parse opaque id strings arriving from clients

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Reserved key under which a document carries its assigned id.
pub const ID_FIELD: &str = "_id";

/// Store-assigned identifier, treated as an uninterpreted token by
/// everything except the store itself.
///
/// The canonical form is the UUID string; anything else fails to parse
/// and is reported to the client as a malformed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Mint a fresh id. Only the store assigns ids.
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id string received from a client.
    pub fn parse(raw: &str) -> Result<Self, InvalidDocumentId> {
        Uuid::parse_str(raw).map(Self).map_err(|_| InvalidDocumentId)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

/// An id string that is not in canonical form.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed document id")]
pub struct InvalidDocumentId;

/// One stored record: a JSON object keyed by field name.
///
/// Documents are schemaless. The only field with meaning to the store is
/// [`ID_FIELD`], written at insertion time and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The assigned id, when present and well-formed.
    pub fn id(&self) -> Option<DocumentId> {
        match self.0.get(ID_FIELD) {
            Some(Value::String(raw)) => DocumentId::parse(raw).ok(),
            _ => None,
        }
    }

    pub(crate) fn set_id(&mut self, id: DocumentId) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }

    /// Drop any id carried in the document. Returns whether one was
    /// present, so callers can tell a stripped body from an untouched one.
    pub fn remove_id(&mut self) -> bool {
        self.0.remove(ID_FIELD).is_some()
    }

    pub(crate) fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_roundtrips_through_display_and_parse() {
        let id = DocumentId::generate();
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_rejects_garbage() {
        assert_eq!(DocumentId::parse("not-an-id"), Err(InvalidDocumentId));
        assert_eq!(DocumentId::parse(""), Err(InvalidDocumentId));
    }

    #[test]
    fn document_builder_sets_fields() {
        let doc = Document::new()
            .with("pickup", "KL Sentral")
            .with("status", "pending");
        assert_eq!(doc.get("pickup"), Some(&json!("KL Sentral")));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn assigned_id_is_readable_back() {
        let mut doc = Document::new().with("name", "Ali");
        assert_eq!(doc.id(), None);

        let id = DocumentId::generate();
        doc.set_id(id);
        assert_eq!(doc.id(), Some(id));
    }

    #[test]
    fn non_string_id_value_is_ignored() {
        let doc = Document::new().with(ID_FIELD, 7);
        assert_eq!(doc.id(), None);
    }

    #[test]
    fn remove_id_reports_presence() {
        let mut doc = Document::new().with("status", "pending");
        assert!(!doc.remove_id());

        doc.set_id(DocumentId::generate());
        assert!(doc.remove_id());
        assert_eq!(doc.get(ID_FIELD), None);
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut doc = Document::new().with("destination", "Mid Valley");
        let id = DocumentId::generate();
        doc.set_id(id);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["destination"], json!("Mid Valley"));
        assert_eq!(value[ID_FIELD], json!(id.to_string()));
    }
}
