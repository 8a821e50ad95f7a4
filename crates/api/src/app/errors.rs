use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

use bulandipe_core::DomainError;
use bulandipe_infra::StoreError;

/// One entry of a 422 response's `detail` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Where the problem is, e.g. `["body", "email"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: "Field required".to_string(),
            kind: "missing",
        }
    }

    pub fn body(msg: impl Into<String>, kind: &'static str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind,
        }
    }
}

impl From<DomainError> for FieldError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => Self {
                loc: vec!["body".to_string(), field.to_string()],
                msg: message,
                kind: "value_error",
            },
            other => Self::body(other.to_string(), "value_error"),
        }
    }
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The request body failed schema validation (422).
    Validation(Vec<FieldError>),

    /// The request body could not be read at all (e.g. too large). Keeps
    /// the framework's status code.
    Rejected { status: StatusCode, message: String },

    /// Anything that went wrong after validation (500).
    ///
    /// `action` completes the sentence "Error <action>: ..." in the response.
    Internal {
        action: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn internal(action: &'static str, source: StoreError) -> Self {
        Self::Internal { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        let kind = match err.classify() {
            serde_json::error::Category::Data => "value_error",
            _ => "json_invalid",
        };
        ApiError::Validation(vec![FieldError::body(err.to_string(), kind)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::Rejected { message, .. } => json!({ "detail": message }),
            ApiError::Internal { action, source } => {
                tracing::error!(error = ?source, "error {action}");
                json!({ "detail": format!("Error {action}: {source}") })
            }
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn internal_error_reflects_action_and_store_message() {
        let err = ApiError::internal(
            "submitting form",
            StoreError::Connection("connection pool closed in insert".to_string()),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        assert_eq!(
            body["detail"],
            "Error submitting form: connection failed: connection pool closed in insert"
        );
    }

    #[test]
    fn json_errors_are_classified() {
        let syntax = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        match ApiError::from(syntax) {
            ApiError::Validation(errs) => assert_eq!(errs[0].kind, "json_invalid"),
            other => panic!("expected Validation, got {other:?}"),
        }

        let data = serde_json::from_str::<String>("42").unwrap_err();
        match ApiError::from(data) {
            ApiError::Validation(errs) => assert_eq!(errs[0].kind, "value_error"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_error_lists_fields() {
        let err = ApiError::Validation(vec![
            FieldError::missing("email"),
            DomainError::validation("contact_person", "value must not be empty").into(),
        ]);
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(resp).await;
        assert_eq!(body["detail"][0]["loc"], json!(["body", "email"]));
        assert_eq!(body["detail"][0]["type"], "missing");
        assert_eq!(body["detail"][1]["loc"], json!(["body", "contact_person"]));
        assert_eq!(body["detail"][1]["msg"], "value must not be empty");
    }
}
