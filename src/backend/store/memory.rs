use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backend::store::{DocumentStore, StoreError};
use crate::shared::document::validate_title;
use crate::shared::{Document, DocumentId};

/// In-memory document store
///
/// Documents live in a `BTreeMap` keyed by id, so iteration order is
/// insertion order. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    documents: BTreeMap<DocumentId, Document>,
    next_id: DocumentId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                documents: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, title: &str) -> Result<Document, StoreError> {
        let title = validate_title(Some(title))?;

        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let doc = Document::new(id, title.to_string());
        inner.documents.insert(id, doc.clone());

        tracing::debug!("[Store] Created document {} in memory", id);
        Ok(doc)
    }

    async fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.documents.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Document, StoreError> {
        let inner = self.inner.read().await;
        inner
            .documents
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_body(&self, id: DocumentId, body: &str) -> Result<Document, StoreError> {
        let mut inner = self.inner.write().await;
        let doc = inner
            .documents
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;

        doc.replace_body(body.to_string());
        tracing::debug!("[Store] Updated body of document {} ({} bytes)", id, body.len());
        Ok(doc.clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.create("Notes").await.unwrap();
        let second = store.create("Plan").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.title, "Notes");
        assert_eq!(first.body, "");
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let store = MemoryStore::new();
        let result = store.create("  ").await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_all_in_insertion_order() {
        let store = MemoryStore::new();
        for title in ["a", "b", "c"] {
            store.create(title).await.unwrap();
        }

        let titles: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let store = MemoryStore::new();
        let result = store.find_by_id(99).await;
        assert!(matches!(result, Err(StoreError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_update_body_replaces_body_only() {
        let store = MemoryStore::new();
        let doc = store.create("Notes").await.unwrap();

        let updated = store.update_body(doc.id, "hello").await.unwrap();
        assert_eq!(updated.body, "hello");
        assert_eq!(updated.title, "Notes");
        assert_eq!(updated.created_at, doc.created_at);
        assert!(updated.updated_at >= doc.updated_at);

        let found = store.find_by_id(doc.id).await.unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_update_body_not_found() {
        let store = MemoryStore::new();
        let result = store.update_body(5, "x").await;
        assert!(matches!(result, Err(StoreError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_list_all_is_a_snapshot() {
        let store = MemoryStore::new();
        let doc = store.create("Notes").await.unwrap();
        let snapshot = store.list_all().await.unwrap();

        store.update_body(doc.id, "changed").await.unwrap();
        assert_eq!(snapshot[0].body, "");
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    proptest! {
        #[test]
        fn prop_created_document_listed_once(title in "[A-Za-z0-9][A-Za-z0-9 ]{0,30}") {
            let store = MemoryStore::new();
            let (doc, listed) = block_on(async {
                store.create("other").await.unwrap();
                let doc = store.create(&title).await.unwrap();
                (doc, store.list_all().await.unwrap())
            });

            prop_assert_eq!(&doc.title, &title);
            prop_assert_eq!(doc.body.as_str(), "");
            prop_assert_eq!(listed.iter().filter(|d| d.id == doc.id).count(), 1);
        }

        #[test]
        fn prop_update_then_find_returns_body(body in ".*") {
            let store = MemoryStore::new();
            let found = block_on(async {
                let doc = store.create("Notes").await.unwrap();
                store.update_body(doc.id, &body).await.unwrap();
                store.find_by_id(doc.id).await.unwrap()
            });

            prop_assert_eq!(found.body, body);
        }
    }
}
