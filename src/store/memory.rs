//! In-memory store backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::document::{Document, DocumentId, ID_FIELD};
use crate::store::filter::Filter;
use crate::store::{DeleteOutcome, ReplaceOutcome, Store, StoreError, UpdateOutcome};

/// Process-local store keeping every collection behind a single lock.
///
/// Each trait call acquires the lock exactly once and releases it before
/// returning, which is the per-operation atomicity the contract promises.
/// Documents keep their insertion order within a collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        document.set_id(id);

        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(document);
        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<DocumentId>, StoreError> {
        let mut ids = Vec::with_capacity(documents.len());

        let mut collections = self.collections.write().await;
        let entries = collections.entry(collection.to_string()).or_default();
        for mut document in documents {
            let id = DocumentId::generate();
            document.set_id(id);
            entries.push(document);
            ids.push(id);
        }
        Ok(ids)
    }

    async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find(&self, collection: &str, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default())
    }

    async fn count_documents(&self, collection: &str, filter: Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        let Some(doc) = docs.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in set.into_fields() {
            if key == ID_FIELD {
                continue;
            }
            if doc.get(&key) != Some(&value) {
                doc.insert(key, value);
                modified = true;
            }
        }
        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Filter,
        mut replacement: Document,
    ) -> Result<ReplaceOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(ReplaceOutcome::default());
        };
        let Some(doc) = docs.iter_mut().find(|doc| filter.matches(doc)) else {
            return Ok(ReplaceOutcome::default());
        };

        // The stored id survives the replacement, whatever the new body says.
        if let Some(id) = doc.id() {
            replacement.set_id(id);
        }
        *doc = replacement;
        Ok(ReplaceOutcome { matched: 1 })
    }

    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteOutcome::default());
        };
        let Some(index) = docs.iter().position(|doc| filter.matches(doc)) else {
            return Ok(DeleteOutcome::default());
        };

        docs.remove(index);
        Ok(DeleteOutcome { deleted: 1 })
    }
}
