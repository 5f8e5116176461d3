use crate::{AppState, handlers};
use axum::{Router, routing::any};

/// Authenticated Router Module
///
/// Endpoints the policy layer guards with role checks (`/api/data`) or ownership
/// checks (`/users/...`). The handlers assume the request was already admitted.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // /api/data
        // RBAC example: requires the `user` or `admin` role upstream.
        .route("/api/data", any(handlers::api_data))
        // /users (redirects to /users/), /users/ and /users/{user_id}/{resource}/...
        // ReBAC example. Prefix match: the bare prefix is routed too so that it
        // reaches the handler's path validation and gets the advisory 400.
        .route("/users", any(handlers::users_prefix_redirect))
        .route("/users/", any(handlers::user_resource))
        .route("/users/{*rest}", any(handlers::user_resource))
}
