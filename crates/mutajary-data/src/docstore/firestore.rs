//! Firestore REST client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use url::Url;

use super::value::{decode_fields, encode_fields};
use super::{Document, DocumentStore, Fields};
use crate::{FetchClient, StoreError};

/// Public Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Connection settings for a Firestore project.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    /// REST base URL, normally [`DEFAULT_FIRESTORE_URL`].
    pub base_url: String,
    /// Firebase project id.
    pub project_id: String,
    /// Web API key sent as the `key` query parameter.
    pub api_key: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_FIRESTORE_URL.to_string(),
            project_id: project_id.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Document store backed by the Firestore REST API.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    fetch: FetchClient,
    config: FirestoreConfig,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    /// Present while more pages remain.
    #[serde(default)]
    next_page_token: Option<String>,
}

impl ListDocumentsResponse {
    fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|token| !token.is_empty())
    }
}

impl FirestoreClient {
    /// Create a client. Fails if the project id is empty.
    pub fn new(config: FirestoreConfig) -> Result<Self, StoreError> {
        Self::with_fetch_client(FetchClient::new(), config)
    }

    /// Create a client over an existing [`FetchClient`].
    pub fn with_fetch_client(fetch: FetchClient, config: FirestoreConfig) -> Result<Self, StoreError> {
        if config.project_id.trim().is_empty() {
            return Err(StoreError::Config("project id is empty".to_string()));
        }
        Url::parse(&config.base_url)
            .map_err(|e| StoreError::Config(format!("base url {}: {}", config.base_url, e)))?;
        Ok(Self { fetch, config })
    }

    /// URL of a collection, including the API key when configured.
    pub fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let raw = format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id,
            collection.trim_matches('/')
        );
        let mut url =
            Url::parse(&raw).map_err(|e| StoreError::Config(format!("collection url {raw}: {e}")))?;
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    /// URL of one page of a collection listing.
    fn list_url(&self, collection: &str, page_token: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.collection_url(collection)?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }
        Ok(url)
    }
}

impl RawDocument {
    fn into_document(self) -> Result<Document, StoreError> {
        let id = document_id(&self.name)
            .ok_or_else(|| StoreError::Decode(format!("document name {:?} has no id", self.name)))?;
        let fields = decode_fields(&self.fields)?;
        Ok(Document::new(id, fields))
    }
}

/// Last path segment of a full document resource name.
fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    /// Every document in the collection; result pages are followed until
    /// the server stops returning a page token.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let url = self.list_url(collection, page_token.as_deref())?;
            let response = self
                .fetch
                .get(url.as_str())
                .accept("application/json")
                .send()
                .await?
                .error_for_status()?;

            let listing: ListDocumentsResponse = response.json()?;
            pages += 1;
            let next = listing.next_page().map(str::to_string);
            for raw in listing.documents {
                documents.push(raw.into_document()?);
            }

            match next {
                Some(token) if page_token.as_deref() != Some(token.as_str()) => {
                    page_token = Some(token)
                }
                Some(_) => {
                    return Err(StoreError::Decode(
                        "listing returned the same page token twice".to_string(),
                    ))
                }
                None => break,
            }
        }

        tracing::debug!(collection, pages, count = documents.len(), "listed documents");
        Ok(documents)
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = self.collection_url(collection)?;
        let body = json!({ "fields": encode_fields(&fields) });

        let response = self
            .fetch
            .post(url.as_str())
            .accept("application/json")
            .json(&body)?
            .send()
            .await?
            .error_for_status()?;

        let created: RawDocument = response.json()?;
        let id = document_id(&created.name)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Decode(format!("created document name {:?} has no id", created.name)))?;

        tracing::debug!(collection, id = %id, "added document");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstore::FieldValue;

    fn client() -> FirestoreClient {
        FirestoreClient::new(FirestoreConfig::new("mutajary").with_api_key("test-key")).unwrap()
    }

    #[test]
    fn test_collection_url() {
        let url = client().collection_url("products").unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/mutajary/databases/(default)/documents/products?key=test-key"
        );
    }

    #[test]
    fn test_collection_url_without_key() {
        let store = FirestoreClient::new(
            FirestoreConfig::new("mutajary").with_base_url("http://localhost:8080/v1/"),
        )
        .unwrap();
        let url = store.collection_url("orders").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/projects/mutajary/databases/(default)/documents/orders"
        );
    }

    #[test]
    fn test_rejects_empty_project() {
        let err = FirestoreClient::new(FirestoreConfig::new("  ")).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = FirestoreClient::new(FirestoreConfig::new("p").with_base_url("::nope")).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_document_id_from_name() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/products/abc123"),
            Some("abc123")
        );
        assert_eq!(document_id("products/"), None);
    }

    #[test]
    fn test_list_response_decoding() {
        let raw = serde_json::json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/products/p1",
                "fields": {
                    "name": {"stringValue": "Tea"},
                    "price": {"doubleValue": 12.5}
                },
                "createTime": "2026-01-01T00:00:00Z",
                "updateTime": "2026-01-01T00:00:00Z"
            }]
        });
        let listing: ListDocumentsResponse = serde_json::from_value(raw).unwrap();
        let docs: Vec<Document> = listing
            .documents
            .into_iter()
            .map(RawDocument::into_document)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "p1");
        assert_eq!(docs[0].fields["price"], FieldValue::Double(12.5));
    }

    #[test]
    fn test_empty_collection_listing() {
        let listing: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(listing.documents.is_empty());
        assert_eq!(listing.next_page(), None);
    }

    #[test]
    fn test_listing_page_token() {
        let raw = serde_json::json!({
            "documents": [{
                "name": "projects/p/databases/(default)/documents/products/p1",
                "fields": {"name": {"stringValue": "Tea"}}
            }],
            "nextPageToken": "AFTER_p1"
        });
        let listing: ListDocumentsResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(listing.documents.len(), 1);
        assert_eq!(listing.next_page(), Some("AFTER_p1"));

        let last: ListDocumentsResponse =
            serde_json::from_str(r#"{"documents":[],"nextPageToken":""}"#).unwrap();
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn test_list_url_carries_page_token() {
        let store = client();
        let first = store.list_url("products", None).unwrap();
        assert_eq!(first, store.collection_url("products").unwrap());

        let next = store.list_url("products", Some("AFTER_p1")).unwrap();
        assert_eq!(
            next.as_str(),
            "https://firestore.googleapis.com/v1/projects/mutajary/databases/(default)/documents/products?key=test-key&pageToken=AFTER_p1"
        );
    }
}
