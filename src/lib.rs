use std::sync::Arc;

use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

// Endpoints grouped by the access tier the policy layer applies (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use auth::{HeaderPresenceResolver, IdentityResolver, IdentityState};
pub use clock::Clock;
pub use config::ServiceConfig;
pub use error::{ApiError, ConfigError};

/// ApiDoc
///
/// OpenAPI document for every endpoint, served at `/api-docs/openapi.json`
/// and browsable through Swagger UI at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root, handlers::health, handlers::api_data,
        handlers::admin_users, handlers::user_resource
    ),
    components(schemas(models::ResponseEnvelope, models::HealthStatus)),
    tags(
        (name = "policy-demo", description = "Endpoints guarded by an external RBAC/ReBAC policy layer")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// Everything a handler may read, built once at startup and shared by every request.
/// Nothing in here is mutated per request except the clock's high-water mark.
#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub identity: IdentityState,
    pub clock: Arc<Clock>,
}

impl AppState {
    /// State with the default header-presence identity resolver.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_identity(config, Arc::new(HeaderPresenceResolver))
    }

    pub fn with_identity(config: ServiceConfig, identity: IdentityState) -> Self {
        Self {
            config,
            identity,
            clock: Arc::new(Clock::new()),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

// Lets the `Caller` extractor reach the resolver without knowing about `AppState`.
impl FromRef<AppState> for IdentityState {
    fn from_ref(app_state: &AppState) -> IdentityState {
        app_state.identity.clone()
    }
}

/// create_router
///
/// Builds the whole request pipeline: the explicit routing table for the three
/// access tiers, the API documentation, and the observability layers around them.
///
/// No layer here authenticates or authorizes anything. The tiers only mirror how the
/// policy proxy in front of the service is configured.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    // Fully permissive. Preflight `OPTIONS` requests carrying `Origin` and
    // `Access-Control-Request-Method` are answered here with an empty 200 and
    // never reach a handler.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Correlation header shared by the request-id layers and the trace span.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Routing Table
    let base_router = Router::new()
        // Documentation: Swagger UI plus the raw OpenAPI document.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public tier: `/` and `/health`.
        .merge(public::public_routes())
        // Authenticated tier: `/api/data` (RBAC) and the `/users/` prefix (ReBAC).
        .merge(authenticated::authenticated_routes())
        // Admin tier, mounted under `/admin`.
        .nest("/admin", admin::admin_routes())
        .with_state(state);

    // 3. Observability Layers
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID: keeps a caller-supplied `x-request-id` (the sidecar usually
                // sets one), otherwise generates a UUID.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Tracing: one span per request, events at DEBUG so the default filter
                // leaves the startup line as the only output.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::DEBUG)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation: echoes the id back on the response.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS (outermost)
        .layer(cors)
}

/// trace_span_logger
///
/// Span factory for `TraceLayer`. Records method, URI and the `x-request-id`
/// assigned in step 3a, so every DEBUG line of one request can be grouped
/// together when `RUST_LOG` turns request logging on.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::debug_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
