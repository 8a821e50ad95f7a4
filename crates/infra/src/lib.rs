//! Infrastructure layer: document store adapters.

pub mod document_store;

pub use document_store::{
    Collection, DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError,
};
