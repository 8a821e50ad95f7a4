//! Request extractors.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};

use crate::app::dto::FormBody;
use crate::app::errors::{ApiError, FieldError};

/// JSON body that has been deserialized *and* validated into a domain form.
///
/// Any failure is answered before the handler runs, so handlers never see
/// invalid input and never touch the store for it. A body without a
/// `Content-Type` header is read as JSON.
pub struct ValidForm<B: FormBody>(pub B::Form);

#[axum::async_trait]
impl<S, B> FromRequest<S> for ValidForm<B>
where
    B: FormBody + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if !is_json {
            return Err(ApiError::Validation(vec![FieldError::body(
                "Expected a JSON request body",
                "content_type",
            )]));
        }

        let body: B = serde_json::from_slice(&bytes).map_err(ApiError::from)?;
        body.into_form().map(ValidForm).map_err(ApiError::Validation)
    }
}

/// Absent, `*/json` and `*/*+json` all count as JSON.
fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some((_, subtype)) => {
            let subtype = subtype.to_ascii_lowercase();
            subtype == "json" || subtype.ends_with("+json")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_content_type_is_json() {
        assert!(json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn json_media_types_are_recognised() {
        for ok in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "text/json",
            "application/vnd.api+json",
        ] {
            assert!(json_content_type(&with_content_type(ok)), "{ok}");
        }
    }

    #[test]
    fn other_media_types_are_not_json() {
        for bad in ["text/plain", "application/x-www-form-urlencoded", "jsonish"] {
            assert!(!json_content_type(&with_content_type(bad)), "{bad}");
        }
    }
}
