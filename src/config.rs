use std::{env, net::SocketAddr};

use crate::error::ConfigError;

/// Fallback service name reported in every envelope when `SERVICE_NAME` is unset.
pub const DEFAULT_SERVICE_NAME: &str = "go-service";
/// Fallback listener port when `SERVICE_PORT` is unset.
pub const DEFAULT_SERVICE_PORT: u16 = 8080;

/// ServiceConfig
///
/// Holds the whole runtime configuration. It is read once at startup and then shared
/// read-only with the dispatcher through `AppState`, so handlers never touch the
/// process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    // Reported verbatim in the `service` field of every envelope and in the startup line.
    pub service_name: String,
    // TCP port the listener binds on all interfaces.
    pub service_port: u16,
    // Runtime environment marker. Selects the log output format.
    pub env: Env,
}

/// Env
///
/// Runtime context. `Local` logs for humans, `Production` logs JSON for aggregators.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_port: DEFAULT_SERVICE_PORT,
            env: Env::Local,
        }
    }
}

impl ServiceConfig {
    /// load
    ///
    /// Reads `SERVICE_NAME`, `SERVICE_PORT` and `APP_ENV` from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPort` when `SERVICE_PORT` is not a valid TCP port.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// from_lookup
    ///
    /// Builds the configuration from an arbitrary key lookup. A variable set to the
    /// empty string counts as unset and falls back to its default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let service_name = get("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let service_port = match get("SERVICE_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_SERVICE_PORT,
        };

        let env = match get("APP_ENV").as_deref() {
            Some("production") => Env::Production,
            _ => Env::Local,
        };

        Ok(Self {
            service_name,
            service_port,
            env,
        })
    }

    /// Address the listener binds: every interface on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.service_port))
    }

    /// Short `:<port>` form used in the startup log line.
    pub fn listen_label(&self) -> String {
        format!(":{}", self.service_port)
    }
}
