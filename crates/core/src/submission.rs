//! Submission records: contact inquiries and collaboration requests.
//!
//! Both records are created once from a validated form and never change
//! afterwards. Construction is the only place an id and a timestamp are
//! assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, IdGenerator};
use crate::email::EmailAddress;
use crate::error::DomainError;
use crate::id::RecordId;

/// Initial status stamped on a record. No transitions are defined.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Contact submissions start here.
    New,
    /// Collaboration requests start here.
    Pending,
}

/// Validated input for a contact submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub institution_name: String,
    pub contact_person: String,
    pub email: EmailAddress,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Validate raw field values, collecting every failure.
    pub fn new(
        institution_name: String,
        contact_person: String,
        email: &str,
        phone: Option<String>,
        message: String,
    ) -> Result<Self, Vec<DomainError>> {
        let (institution_name, contact_person, email) =
            validate_party(institution_name, contact_person, email)?;
        Ok(Self {
            institution_name,
            contact_person,
            email,
            phone: phone.unwrap_or_default(),
            message,
        })
    }
}

/// Validated input for a collaboration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaborationForm {
    pub institution_name: String,
    pub contact_person: String,
    pub email: EmailAddress,
    pub phone: String,
    pub message: String,
}

impl CollaborationForm {
    /// Validate raw field values, collecting every failure.
    pub fn new(
        institution_name: String,
        contact_person: String,
        email: &str,
        phone: Option<String>,
        message: Option<String>,
    ) -> Result<Self, Vec<DomainError>> {
        let (institution_name, contact_person, email) =
            validate_party(institution_name, contact_person, email)?;
        Ok(Self {
            institution_name,
            contact_person,
            email,
            phone: phone.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "value must not be empty"));
    }
    Ok(value)
}

fn validate_party(
    institution_name: String,
    contact_person: String,
    email: &str,
) -> Result<(String, String, EmailAddress), Vec<DomainError>> {
    let institution_name = non_blank("institution_name", institution_name);
    let contact_person = non_blank("contact_person", contact_person);
    let email = EmailAddress::parse(email);

    match (institution_name, contact_person, email) {
        (Ok(i), Ok(c), Ok(e)) => Ok((i, c, e)),
        (i, c, e) => Err([i.err(), c.err(), e.err()].into_iter().flatten().collect()),
    }
}

/// A general contact inquiry, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    id: RecordId,
    institution_name: String,
    contact_person: String,
    email: EmailAddress,
    phone: String,
    message: String,
    submitted_at: DateTime<Utc>,
    status: SubmissionStatus,
}

impl ContactSubmission {
    pub fn create(form: ContactForm, clock: &dyn Clock, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            institution_name: form.institution_name,
            contact_person: form.contact_person,
            email: form.email,
            phone: form.phone,
            message: form.message,
            submitted_at: clock.now(),
            status: SubmissionStatus::New,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }
}

/// An institutional collaboration request, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRequest {
    id: RecordId,
    institution_name: String,
    contact_person: String,
    email: EmailAddress,
    phone: String,
    message: String,
    submitted_at: DateTime<Utc>,
    status: SubmissionStatus,
}

impl CollaborationRequest {
    pub fn create(form: CollaborationForm, clock: &dyn Clock, ids: &dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            institution_name: form.institution_name,
            contact_person: form.contact_person,
            email: form.email,
            phone: form.phone,
            message: form.message,
            submitted_at: clock.now(),
            status: SubmissionStatus::Pending,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }
}
