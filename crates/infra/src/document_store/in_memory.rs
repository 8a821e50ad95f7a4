use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value as JsonValue;

use super::r#trait::{document_id, Collection, DocumentStore, StoreError};

/// In-memory document store.
///
/// Intended for tests/dev. Documents live as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<JsonValue>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every document in a collection, in insertion order.
    pub fn documents(&self, collection: Collection) -> Vec<JsonValue> {
        match self.collections.read() {
            Ok(map) => map.get(&collection).cloned().unwrap_or_default(),
            Err(_) => vec![],
        }
    }

    /// Look up a document by its `id` field.
    pub fn find_by_id(&self, collection: Collection, id: &str) -> Option<JsonValue> {
        let map = self.collections.read().ok()?;
        map.get(&collection)?
            .iter()
            .find(|doc| doc.get("id").and_then(JsonValue::as_str) == Some(id))
            .cloned()
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: Collection, document: JsonValue) -> Result<(), StoreError> {
        let id = document_id(&document)?.to_string();

        let mut map = self
            .collections
            .write()
            .map_err(|_| StoreError::Connection("in-memory store lock poisoned".to_string()))?;
        let docs = map.entry(collection).or_default();

        if docs
            .iter()
            .any(|doc| doc.get("id").and_then(JsonValue::as_str) == Some(id.as_str()))
        {
            return Err(StoreError::Duplicate(format!("{collection}/{id}")));
        }

        docs.push(document);
        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        let map = self
            .collections
            .read()
            .map_err(|_| StoreError::Connection("in-memory store lock poisoned".to_string()))?;
        Ok(map.get(&collection).map(|docs| docs.len() as u64).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn empty_collections_count_zero() {
        let store = InMemoryDocumentStore::new();
        for c in Collection::ALL {
            assert_eq!(store.count(c).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn insert_is_scoped_to_its_collection() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(Collection::ContactSubmissions, json!({ "id": "a", "status": "new" }))
            .await
            .unwrap();
        store
            .insert(Collection::ContactSubmissions, json!({ "id": "b", "status": "new" }))
            .await
            .unwrap();

        assert_eq!(store.count(Collection::ContactSubmissions).await.unwrap(), 2);
        assert_eq!(store.count(Collection::CollaborationRequests).await.unwrap(), 0);
        assert_eq!(
            store.find_by_id(Collection::ContactSubmissions, "b").unwrap()["status"],
            "new"
        );
        assert!(store.find_by_id(Collection::CollaborationRequests, "b").is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_and_not_stored() {
        let store = InMemoryDocumentStore::new();
        let c = Collection::CollaborationRequests;
        store.insert(c, json!({ "id": "same" })).await.unwrap();

        let err = store.insert(c, json!({ "id": "same" })).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.count(c).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_id_in_different_collections_is_fine() {
        let store = InMemoryDocumentStore::new();
        store
            .insert(Collection::ContactSubmissions, json!({ "id": "x" }))
            .await
            .unwrap();
        store
            .insert(Collection::CollaborationRequests, json!({ "id": "x" }))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn documents_without_id_are_rejected() {
        let store = InMemoryDocumentStore::new();
        let c = Collection::ContactSubmissions;

        let err = store.insert(c, json!({ "status": "new" })).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        let err = store.insert(c, json!([1, 2, 3])).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(store.documents(c).is_empty());
    }

    #[test]
    fn collection_names_are_stable() {
        assert_eq!(Collection::ContactSubmissions.as_str(), "contact_submissions");
        assert_eq!(Collection::CollaborationRequests.to_string(), "collaboration_requests");
    }
}
