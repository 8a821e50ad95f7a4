//! Document store boundary.
//!
//! Submissions are persisted as flat JSON documents grouped into named
//! collections. The API layer only ever needs two things from a store:
//! insert a document and count a collection.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use r#trait::{Collection, DocumentStore, StoreError};
