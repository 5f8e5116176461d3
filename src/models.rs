use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// ResponseEnvelope
///
/// The uniform JSON body returned by every endpoint except `/health`.
/// Built fresh per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ResponseEnvelope {
    // Configured service name (`SERVICE_NAME`).
    pub service: String,
    pub message: String,
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,

    /// Coarse caller label, or the raw user segment on resource paths.
    /// Omitted from the JSON when empty; only an empty user segment
    /// (e.g. `/users//profile`) gets here.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
}

/// HealthStatus
///
/// Constant liveness payload: `{"status":"healthy"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
