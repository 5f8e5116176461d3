use std::{convert::Infallible, sync::Arc};

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};

/// Label for callers that presented an `Authorization` header.
pub const AUTHENTICATED_USER: &str = "authenticated-user";
/// Label for callers without one.
pub const ANONYMOUS: &str = "anonymous";

/// IdentityResolver
///
/// The seam between request handling and identity. Handlers only ever see the
/// label returned here, so a component that really verifies the forwarded token
/// can be swapped in without touching response formatting.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap) -> String;
}

/// Shared handle to the active resolver, stored in `AppState`.
pub type IdentityState = Arc<dyn IdentityResolver>;

/// HeaderPresenceResolver
///
/// Placeholder classification: a non-empty `Authorization` header means the
/// policy proxy in front already validated the caller. The value itself is not
/// parsed or checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPresenceResolver;

impl HeaderPresenceResolver {
    pub fn classify(headers: &HeaderMap) -> &'static str {
        match headers.get(header::AUTHORIZATION) {
            Some(value) if !value.as_bytes().is_empty() => AUTHENTICATED_USER,
            _ => ANONYMOUS,
        }
    }
}

#[async_trait]
impl IdentityResolver for HeaderPresenceResolver {
    async fn resolve(&self, headers: &HeaderMap) -> String {
        Self::classify(headers).to_string()
    }
}

/// Caller
///
/// Extractor yielding the resolved identity label of the current request.
/// It never rejects: an unidentified caller is simply `anonymous`.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub label: String,
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
    IdentityState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = IdentityState::from_ref(state);
        let label = resolver.resolve(&parts.headers).await;
        tracing::debug!(caller = %label, "resolved caller identity");
        Ok(Caller { label })
    }
}
