//! Remote document store.
//!
//! Products and orders live in named collections of schemaless documents.
//! [`FirestoreClient`] speaks the Firestore REST protocol;
//! [`MemoryDocumentStore`] keeps everything in process.

mod firestore;
mod memory;
mod value;

pub use firestore::{FirestoreClient, FirestoreConfig, DEFAULT_FIRESTORE_URL};
pub use memory::MemoryDocumentStore;
pub use value::{FieldValue, Fields};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::StoreError;

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: String,
    /// Document fields.
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Deserialize the fields into `T` through their plain JSON form.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(value::fields_to_json(&self.fields))
            .map_err(|e| StoreError::Decode(format!("document {}: {}", self.id, e)))
    }
}

/// A collection-oriented document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection`.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Add a document with a store-assigned id and return that id.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;
}
