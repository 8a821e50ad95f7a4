use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::dto::{HealthResponse, RootResponse};
use crate::app::services::AppServices;

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "BulandiPe API is running",
        status: "healthy",
    })
}

/// Liveness only: does not touch the store.
pub async fn health(Extension(services): Extension<Arc<AppServices>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: services.now(),
    })
}
