//! Document Store Module
//!
//! Persistence abstraction for documents. Handlers only see the
//! [`DocumentStore`] trait; the concrete backend is picked at startup.
//!
//! # Backends
//!
//! - **`memory`** - `MemoryStore`, an in-process map used when no database
//!   is configured and in tests
//! - **`postgres`** - `PgStore`, backed by the `documents` table
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs       - Trait, error type, re-exports
//! ├── memory.rs    - In-memory backend
//! └── postgres.rs  - PostgreSQL backend
//! ```
//!
//! # Atomicity
//!
//! Each operation is atomic per document. No cross-request coordination is
//! performed here; concurrent edits to the same document resolve as last
//! writer wins.

/// In-memory backend
pub mod memory;

/// PostgreSQL backend
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::{Document, DocumentId, SharedError};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors raised by a [`DocumentStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document has the requested id
    #[error("Document {0} not found")]
    NotFound(DocumentId),

    /// A required field was missing or blank
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// The underlying database failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage contract for documents
///
/// Implementations assign ids and maintain `created_at`/`updated_at`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with the given title and an empty body
    ///
    /// # Errors
    ///
    /// * `StoreError::Validation` - title is blank
    async fn create(&self, title: &str) -> Result<Document, StoreError>;

    /// Snapshot of every document in id order
    async fn list_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Look up a document by id
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - no document has that id
    async fn find_by_id(&self, id: DocumentId) -> Result<Document, StoreError>;

    /// Replace a document's body, refreshing `updated_at`
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - no document has that id
    async fn update_body(&self, id: DocumentId, body: &str) -> Result<Document, StoreError>;

    /// Short backend name for logging
    fn backend_name(&self) -> &'static str;
}
