use std::sync::Arc;

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Named grouping of documents.
///
/// This enum is the only way to address a collection, so adapters can embed
/// `as_str()` in queries without ever touching caller-supplied names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Collection {
    ContactSubmissions,
    CollaborationRequests,
}

impl Collection {
    pub const ALL: [Collection; 2] = [
        Collection::ContactSubmissions,
        Collection::CollaborationRequests,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::ContactSubmissions => "contact_submissions",
            Collection::CollaborationRequests => "collaboration_requests",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document store operation error.
///
/// These are **infrastructure errors**; the `Display` text is what the API
/// reflects back to clients on a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (pool closed, timeout, network).
    #[error("connection failed: {0}")]
    Connection(String),

    /// The store rejected or failed a query.
    #[error("query failed: {0}")]
    Query(String),

    /// The document could not be encoded for storage (e.g. missing `id`).
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A document with the same `id` already exists in the collection.
    #[error("duplicate document id: {0}")]
    Duplicate(String),
}

/// Minimal document store interface.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document into a collection.
    ///
    /// The document must be a JSON object with a string `id` field; the id is
    /// unique within the collection.
    async fn insert(&self, collection: Collection, document: JsonValue) -> Result<(), StoreError>;

    /// Count all documents currently in a collection.
    async fn count(&self, collection: Collection) -> Result<u64, StoreError>;
}

#[async_trait::async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn insert(&self, collection: Collection, document: JsonValue) -> Result<(), StoreError> {
        (**self).insert(collection, document).await
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        (**self).count(collection).await
    }
}

/// Extract the `id` every stored document carries.
pub(crate) fn document_id(document: &JsonValue) -> Result<&str, StoreError> {
    document
        .as_object()
        .ok_or_else(|| StoreError::Serialization("document is not a JSON object".to_string()))?
        .get("id")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| StoreError::Serialization("document has no string `id` field".to_string()))
}
