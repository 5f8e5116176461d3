use crate::{AppState, handlers};
use axum::{Router, routing::any};

/// Public Router Module
///
/// Endpoints the policy layer lets through without credentials.
/// Every route answers any HTTP method.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // / (exact match only)
        // Greeting envelope carrying the caller label.
        .route("/", any(handlers::root))
        // /health
        // Liveness probe. Always `{"status":"healthy"}`.
        .route("/health", any(handlers::health))
}
