//! `bulandipe-core`: domain building blocks for form submissions.
//!
//! This crate contains **pure domain** types (no IO, no HTTP, no storage):
//! identifiers, the email value object, the two submission records, and the
//! clock / id seams used to stamp them.

pub mod clock;
pub mod email;
pub mod error;
pub mod id;
pub mod submission;
pub mod value_object;

pub use clock::{Clock, FixedClock, IdGenerator, RandomIds, SequentialIds, SystemClock};
pub use email::EmailAddress;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use submission::{
    CollaborationForm, CollaborationRequest, ContactForm, ContactSubmission, SubmissionStatus,
};
pub use value_object::ValueObject;
