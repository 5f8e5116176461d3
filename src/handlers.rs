use crate::{
    AppState,
    auth::Caller,
    error::ApiError,
    models::{HealthStatus, ResponseEnvelope},
};
use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub const ROOT_MESSAGE: &str = "Hello from Go service! This is a public endpoint.";
pub const API_DATA_MESSAGE: &str = "API data endpoint - requires user or admin role";
pub const ADMIN_USERS_MESSAGE: &str = "Admin endpoint - requires admin role";

// --- Path Parsing ---

/// ResourcePath
///
/// The two meaningful segments of a `/users/{user_id}/{resource}` request.
/// Neither segment is validated: any value, including an empty one between
/// two slashes, is echoed back as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePath {
    pub user_id: String,
    pub resource: String,
}

impl ResourcePath {
    /// parse
    ///
    /// Percent-decodes the full request path, trims leading and trailing slashes,
    /// splits on `/` and requires at least three segments (`users`, user id,
    /// resource). Anything after the resource is ignored.
    ///
    /// Decoding happens before splitting, so an encoded `%2F` separates segments.
    /// Invalid UTF-8 after decoding is replaced, never rejected.
    pub fn parse(path: &str) -> Result<Self, ApiError> {
        let decoded = urlencoding::decode_binary(path.as_bytes());
        let decoded = String::from_utf8_lossy(&decoded);
        let mut segments = decoded.trim_matches('/').split('/').skip(1);
        match (segments.next(), segments.next()) {
            (Some(user_id), Some(resource)) => Ok(Self {
                user_id: user_id.to_string(),
                resource: resource.to_string(),
            }),
            _ => Err(ApiError::InvalidResourcePath),
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Resource-based access: user {}'s {} (OPA validates ownership)",
            self.user_id, self.resource
        )
    }
}

fn envelope(state: &AppState, message: impl Into<String>, user: String) -> Json<ResponseEnvelope> {
    Json(ResponseEnvelope {
        service: state.config.service_name.clone(),
        message: message.into(),
        timestamp: state.clock.now(),
        user,
    })
}

// --- Handlers ---

/// root
///
/// [Public Route] Greeting endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Public greeting", body = ResponseEnvelope))
)]
pub async fn root(State(state): State<AppState>, caller: Caller) -> Json<ResponseEnvelope> {
    envelope(&state, ROOT_MESSAGE, caller.label)
}

/// health
///
/// [Public Route] Liveness probe for load balancers and the sidecar. Ignores all headers.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

/// api_data
///
/// [Authenticated Route] The `user`/`admin` role requirement named in the message
/// is enforced by the policy layer, not here.
#[utoipa::path(
    get,
    path = "/api/data",
    responses((status = 200, description = "API data", body = ResponseEnvelope))
)]
pub async fn api_data(State(state): State<AppState>, caller: Caller) -> Json<ResponseEnvelope> {
    envelope(&state, API_DATA_MESSAGE, caller.label)
}

/// admin_users
///
/// [Admin Route] Same shape as the other envelopes; the `admin` role check lives upstream.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses((status = 200, description = "Admin listing", body = ResponseEnvelope))
)]
pub async fn admin_users(State(state): State<AppState>, caller: Caller) -> Json<ResponseEnvelope> {
    envelope(&state, ADMIN_USERS_MESSAGE, caller.label)
}

/// user_resource
///
/// [Authenticated Route] ReBAC example. Echoes the user and resource from the path
/// and reports the raw user segment as `user`. Ownership is validated by the
/// policy engine before the request reaches this service.
#[utoipa::path(
    get,
    path = "/users/{user_id}/{resource}",
    params(
        ("user_id" = String, Path, description = "Owner of the resource"),
        ("resource" = String, Path, description = "Resource name, e.g. profile or data")
    ),
    responses(
        (status = 200, description = "Resource access", body = ResponseEnvelope),
        (status = 400, description = "Path lacks a user id or resource", body = String, content_type = "text/plain")
    )
)]
pub async fn user_resource(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let resource_path = ResourcePath::parse(uri.path()).inspect_err(|_| {
        tracing::debug!(path = %uri.path(), "rejected malformed resource path");
    })?;
    let message = resource_path.message();
    Ok(envelope(&state, message, resource_path.user_id))
}

/// users_prefix_redirect
///
/// `/users` without the trailing slash answers `301 Moved Permanently` to `/users/`,
/// keeping the query string, so clients land on the resource route and its advisory 400.
pub async fn users_prefix_redirect(OriginalUri(uri): OriginalUri) -> Response {
    let location = match uri.query() {
        Some(query) => format!("/users/?{query}"),
        None => "/users/".to_string(),
    };
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}
