//! In-process document store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Document, DocumentStore, Fields};
use crate::StoreError;

/// Document store kept in memory, with insertion order preserved per
/// collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    next_id: AtomicU64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with existing documents.
    pub fn with_documents(self, collection: &str, documents: Vec<Document>) -> Self {
        if let Ok(mut collections) = self.collections.lock() {
            collections
                .entry(collection.to_string())
                .or_default()
                .extend(documents);
        }
        self
    }

    /// Snapshot of a collection's documents.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .map(|c| c.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let mut collections = self
            .collections
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstore::FieldValue;

    #[tokio::test]
    async fn test_add_then_list() {
        let store = MemoryDocumentStore::new();
        let mut fields = Fields::new();
        fields.insert("total".into(), FieldValue::Integer(40));

        let id = store.add("orders", fields.clone()).await.unwrap();
        assert_eq!(id, "doc-1");

        let listed = store.list("orders").await.unwrap();
        assert_eq!(listed, vec![Document::new("doc-1", fields)]);
        assert!(store.list("products").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_documents_keep_order() {
        let store = MemoryDocumentStore::new().with_documents(
            "products",
            vec![
                Document::new("b", Fields::new()),
                Document::new("a", Fields::new()),
            ],
        );
        let ids: Vec<String> = store
            .list("products")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
