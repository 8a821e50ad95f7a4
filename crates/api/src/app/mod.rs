//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store, clock and id sources shared by all handlers
//! - `routes/`: HTTP handlers
//! - `dto.rs`: request/response bodies and form validation
//! - `extract.rs`: the validating JSON extractor
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
///
/// CORS is wide open: any origin (mirrored, so credentialed requests work),
/// any method, any header.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::very_permissive())
            .layer(Extension(services)),
    )
}
