use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::dto::{
    self, CollaborationAccepted, CollaborationRequestBody, ContactAccepted, ContactRequest,
    StatsResponse,
};
use crate::app::errors::ApiError;
use crate::app::extract::ValidForm;
use crate::app::services::AppServices;

pub async fn submit_contact(
    Extension(services): Extension<Arc<AppServices>>,
    ValidForm(form): ValidForm<ContactRequest>,
) -> Result<Json<ContactAccepted>, ApiError> {
    let id = services
        .submit_contact(form)
        .await
        .map_err(|e| ApiError::internal("submitting form", e))?;

    Ok(Json(ContactAccepted {
        success: true,
        message: dto::CONTACT_ACK,
        submission_id: id,
    }))
}

pub async fn submit_collaboration(
    Extension(services): Extension<Arc<AppServices>>,
    ValidForm(form): ValidForm<CollaborationRequestBody>,
) -> Result<Json<CollaborationAccepted>, ApiError> {
    let id = services
        .submit_collaboration(form)
        .await
        .map_err(|e| ApiError::internal("submitting request", e))?;

    Ok(Json(CollaborationAccepted {
        success: true,
        message: dto::COLLABORATION_ACK,
        request_id: id,
    }))
}

pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let counts = services
        .counts()
        .await
        .map_err(|e| ApiError::internal("fetching stats", e))?;

    Ok(Json(StatsResponse {
        total_contacts: counts.total_contacts,
        total_collaborations: counts.total_collaborations,
        timestamp: counts.taken_at,
    }))
}
