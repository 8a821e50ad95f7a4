//! Service wiring: the store plus the clock and id sources, built once at
//! start-up and shared by every request.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use bulandipe_core::{
    Clock, CollaborationForm, CollaborationRequest, ContactForm, ContactSubmission, IdGenerator,
    RandomIds, RecordId, SystemClock,
};
use bulandipe_infra::{
    Collection, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError,
};

use crate::config::{Config, StoreBackend};

/// Point-in-time document counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionCounts {
    pub total_contacts: u64,
    pub total_collaborations: u64,
    pub taken_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self { store, clock, ids }
    }

    /// Production sources (wall clock, random ids) over the given store.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, Arc::new(SystemClock), Arc::new(RandomIds))
    }

    /// In-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryDocumentStore::new()))
    }

    /// Build services for the configured backend.
    ///
    /// For Postgres this connects the pool and creates missing tables, so a
    /// misconfigured database fails start-up rather than the first request.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("using in-memory document store; submissions are not persisted");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres => {
                let store =
                    PostgresDocumentStore::connect(&config.database_url, config.db_max_connections)
                        .await?;
                store.ensure_schema().await?;
                tracing::info!("connected to postgres document store");
                Ok(Self::with_store(Arc::new(store)))
            }
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub async fn submit_contact(&self, form: ContactForm) -> Result<RecordId, StoreError> {
        let record = ContactSubmission::create(form, self.clock.as_ref(), self.ids.as_ref());
        let id = record.id();
        self.store_record(Collection::ContactSubmissions, &record).await?;
        tracing::info!(submission_id = %id, "contact submission stored");
        Ok(id)
    }

    pub async fn submit_collaboration(
        &self,
        form: CollaborationForm,
    ) -> Result<RecordId, StoreError> {
        let record = CollaborationRequest::create(form, self.clock.as_ref(), self.ids.as_ref());
        let id = record.id();
        self.store_record(Collection::CollaborationRequests, &record).await?;
        tracing::info!(request_id = %id, "collaboration request stored");
        Ok(id)
    }

    /// Counts are taken independently; concurrent writes may land between them.
    pub async fn counts(&self) -> Result<SubmissionCounts, StoreError> {
        let (total_contacts, total_collaborations) = tokio::try_join!(
            self.store.count(Collection::ContactSubmissions),
            self.store.count(Collection::CollaborationRequests),
        )?;
        Ok(SubmissionCounts {
            total_contacts,
            total_collaborations,
            taken_at: self.clock.now(),
        })
    }

    async fn store_record<T: serde::Serialize>(
        &self,
        collection: Collection,
        record: &T,
    ) -> Result<(), StoreError> {
        let document =
            serde_json::to_value(record).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.insert(collection, document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulandipe_core::{FixedClock, SequentialIds};
    use chrono::TimeZone;

    fn services() -> (AppServices, Arc<InMemoryDocumentStore>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let services = AppServices::new(
            store.clone(),
            Arc::new(FixedClock(at)),
            Arc::new(SequentialIds::new()),
        );
        (services, store)
    }

    fn contact_form() -> ContactForm {
        ContactForm::new(
            "Acme School".to_string(),
            "Jo Lee".to_string(),
            "jo@acme.edu",
            Some(String::new()),
            "Hello".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn contact_is_stored_under_returned_id_with_status_new() {
        let (services, store) = services();
        let id = services.submit_contact(contact_form()).await.unwrap();

        let doc = store
            .find_by_id(Collection::ContactSubmissions, &id.to_string())
            .unwrap();
        assert_eq!(doc["status"], "new");
        assert_eq!(doc["submitted_at"], "2025-06-01T12:00:00Z");
        assert_eq!(doc["email"], "jo@acme.edu");
    }

    #[tokio::test]
    async fn collaboration_is_stored_pending() {
        let (services, store) = services();
        let form = CollaborationForm::new(
            "Acme".to_string(),
            "Jo".to_string(),
            "jo@acme.edu",
            None,
            None,
        )
        .unwrap();
        let id = services.submit_collaboration(form).await.unwrap();

        let doc = store
            .find_by_id(Collection::CollaborationRequests, &id.to_string())
            .unwrap();
        assert_eq!(doc["status"], "pending");
        assert_eq!(doc["message"], "");
    }

    #[tokio::test]
    async fn counts_follow_submissions() {
        let (services, _store) = services();
        let before = services.counts().await.unwrap();
        assert_eq!(before.total_contacts, 0);
        assert_eq!(before.total_collaborations, 0);

        services.submit_contact(contact_form()).await.unwrap();
        services.submit_contact(contact_form()).await.unwrap();

        let after = services.counts().await.unwrap();
        assert_eq!(after.total_contacts, 2);
        assert_eq!(after.total_collaborations, 0);
    }
}
