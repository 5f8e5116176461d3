use crate::{AppState, handlers};
use axum::{Router, routing::any};

/// Admin Router Module
///
/// Endpoints the policy layer restricts to the `admin` role. Nested under `/admin`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // /admin/users
        .route("/users", any(handlers::admin_users))
}
