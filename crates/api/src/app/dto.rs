use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use bulandipe_core::{CollaborationForm, ContactForm, RecordId};

use crate::app::errors::FieldError;

pub const CONTACT_ACK: &str = "Thank you for contacting us! We'll get back to you soon.";
pub const COLLABORATION_ACK: &str =
    "Thank you for your interest! Our team will reach out to discuss collaboration opportunities.";

/// A JSON request body that turns into a validated domain form.
///
/// Fields are deserialized as `Option` so that every missing field can be
/// reported at once instead of failing on the first one.
pub trait FormBody: DeserializeOwned + Send {
    type Form: Send;

    fn into_form(self) -> Result<Self::Form, Vec<FieldError>>;
}

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    #[serde(deserialize_with = "present")]
    pub institution_name: Option<String>,
    #[serde(deserialize_with = "present")]
    pub contact_person: Option<String>,
    #[serde(deserialize_with = "present")]
    pub email: Option<String>,
    #[serde(deserialize_with = "present")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "present")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CollaborationRequestBody {
    #[serde(deserialize_with = "present")]
    pub institution_name: Option<String>,
    #[serde(deserialize_with = "present")]
    pub contact_person: Option<String>,
    #[serde(deserialize_with = "present")]
    pub email: Option<String>,
    #[serde(deserialize_with = "present")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "present")]
    pub message: Option<String>,
}

/// `None` only when the field is absent (via `#[serde(default)]`); an explicit
/// `null` is a type error like any other non-string.
fn present<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

fn require(
    field: &'static str,
    value: Option<String>,
    missing: &mut Vec<FieldError>,
) -> String {
    value.unwrap_or_else(|| {
        missing.push(FieldError::missing(field));
        String::new()
    })
}

impl FormBody for ContactRequest {
    type Form = ContactForm;

    fn into_form(self) -> Result<ContactForm, Vec<FieldError>> {
        let mut missing = Vec::new();
        let institution_name = require("institution_name", self.institution_name, &mut missing);
        let contact_person = require("contact_person", self.contact_person, &mut missing);
        let email = require("email", self.email, &mut missing);
        let message = require("message", self.message, &mut missing);
        if !missing.is_empty() {
            return Err(missing);
        }

        ContactForm::new(institution_name, contact_person, &email, self.phone, message)
            .map_err(|errs| errs.into_iter().map(FieldError::from).collect())
    }
}

impl FormBody for CollaborationRequestBody {
    type Form = CollaborationForm;

    fn into_form(self) -> Result<CollaborationForm, Vec<FieldError>> {
        let mut missing = Vec::new();
        let institution_name = require("institution_name", self.institution_name, &mut missing);
        let contact_person = require("contact_person", self.contact_person, &mut missing);
        let email = require("email", self.email, &mut missing);
        if !missing.is_empty() {
            return Err(missing);
        }

        CollaborationForm::new(institution_name, contact_person, &email, self.phone, self.message)
            .map_err(|errs| errs.into_iter().map(FieldError::from).collect())
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: &'static str,
    pub submission_id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct CollaborationAccepted {
    pub success: bool,
    pub message: &'static str,
    pub request_id: RecordId,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_contacts: u64,
    pub total_collaborations: u64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact(value: serde_json::Value) -> ContactRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn contact_reports_every_missing_field() {
        let errs = contact(json!({ "phone": "123" })).into_form().unwrap_err();
        let fields: Vec<_> = errs.iter().map(|e| e.loc[1].as_str()).collect();
        assert_eq!(
            fields,
            vec!["institution_name", "contact_person", "email", "message"]
        );
        assert!(errs.iter().all(|e| e.kind == "missing"));
    }

    #[test]
    fn contact_phone_defaults_to_empty() {
        let form = contact(json!({
            "institution_name": "Acme School",
            "contact_person": "Jo Lee",
            "email": "jo@acme.edu",
            "message": "Hello",
        }))
        .into_form()
        .unwrap();
        assert_eq!(form.phone, "");
        assert_eq!(form.email.as_str(), "jo@acme.edu");
    }

    #[test]
    fn explicit_null_is_a_type_error_not_a_default() {
        for field in ["phone", "message", "email"] {
            let mut body = json!({
                "institution_name": "Acme",
                "contact_person": "Jo",
                "email": "jo@acme.edu",
            });
            body[field] = serde_json::Value::Null;
            assert!(
                serde_json::from_value::<CollaborationRequestBody>(body).is_err(),
                "{field}: null should not deserialize"
            );
        }
    }

    #[test]
    fn collaboration_message_is_optional() {
        let body: CollaborationRequestBody = serde_json::from_value(json!({
            "institution_name": "Acme",
            "contact_person": "Jo",
            "email": "jo@acme.edu",
        }))
        .unwrap();
        let form = body.into_form().unwrap();
        assert_eq!(form.message, "");
    }

    #[test]
    fn invalid_email_is_a_value_error_on_email() {
        let body: CollaborationRequestBody = serde_json::from_value(json!({
            "institution_name": "Acme",
            "contact_person": "Jo",
            "email": "not-an-email",
        }))
        .unwrap();
        let errs = body.into_form().unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].loc, vec!["body", "email"]);
        assert_eq!(errs[0].kind, "value_error");
    }

    #[test]
    fn acceptance_payloads_use_distinct_id_keys() {
        let id = RecordId::new();
        let contact = serde_json::to_value(ContactAccepted {
            success: true,
            message: CONTACT_ACK,
            submission_id: id,
        })
        .unwrap();
        let collab = serde_json::to_value(CollaborationAccepted {
            success: true,
            message: COLLABORATION_ACK,
            request_id: id,
        })
        .unwrap();

        assert_eq!(contact["submission_id"], id.to_string());
        assert!(contact.get("request_id").is_none());
        assert_eq!(collab["request_id"], id.to_string());
        assert!(collab.get("submission_id").is_none());
    }
}
