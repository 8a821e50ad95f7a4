use axum::{
    routing::{get, post},
    Router,
};

pub mod submissions;
pub mod system;

/// Router for every endpoint (no authentication layer exists).
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/api/health", get(system::health))
        .route("/api/contact", post(submissions::submit_contact))
        .route("/api/collaboration", post(submissions::submit_collaboration))
        .route("/api/submissions/stats", get(submissions::stats))
}
