//! Document store subsystem.
//!
//! # Responsibilities
//! - Define the storage contract the API handlers program against
//! - Keep documents as schemaless JSON objects with opaque ids
//! - Provide the in-memory backend and sample-data seeding
//!
//! # Data Flow
//! ```text
//! Handler
//!     │ one operation, one collection
//!     ▼
//! Store trait ──▶ MemoryStore (lock, scan, mutate, unlock)
//!     │
//!     ▼
//! Outcome structs (matched / modified / deleted counts)
//! ```
//!
//! # Design Decisions
//! - Each operation is atomic on its own; nothing spans two calls, so a
//!   read-then-write handler sequence can interleave with other requests
//! - Filters are equality-only conjunctions ([`Filter`])
//! - Ids are assigned at insertion and never change afterwards

pub mod document;
pub mod filter;
pub mod memory;
pub mod seed;

pub use document::{Document, DocumentId, InvalidDocumentId, ID_FIELD};
pub use filter::Filter;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Collection names used by the service.
pub mod collections {
    pub const USERS: &str = "users";
    pub const RIDES: &str = "rides";
}

/// Result of an update: how many documents the filter matched and how
/// many actually changed. Matched without modified means the targeted
/// document already held the requested values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Result of a replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub matched: u64,
}

/// Result of a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: u64,
}

/// Failure reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Storage contract for the API.
///
/// Handlers hold this as `Arc<dyn Store>`, so backends can be swapped
/// without touching the HTTP layer. Unknown collections behave as empty:
/// reads return nothing and writes create the collection on first insert.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert one document, assigning it a fresh id. Any id already in
    /// the document is overwritten.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId, StoreError>;

    /// Insert several documents, returning their assigned ids in order.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<DocumentId>, StoreError>;

    /// First document matching the filter, if any.
    async fn find_one(&self, collection: &str, filter: Filter) -> Result<Option<Document>, StoreError>;

    /// All documents matching the filter, in insertion order.
    async fn find(&self, collection: &str, filter: Filter) -> Result<Vec<Document>, StoreError>;

    /// Number of documents matching the filter.
    async fn count_documents(&self, collection: &str, filter: Filter) -> Result<u64, StoreError>;

    /// Merge the fields of `set` into the first matching document. The id
    /// field is immutable and silently skipped.
    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Replace the first matching document wholesale, keeping its id.
    async fn replace_one(
        &self,
        collection: &str,
        filter: Filter,
        replacement: Document,
    ) -> Result<ReplaceOutcome, StoreError>;

    /// Delete the first matching document.
    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<DeleteOutcome, StoreError>;
}
