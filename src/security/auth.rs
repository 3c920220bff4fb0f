//! API key authentication middleware.
//!
//! Only checks that the configured header carries a non-empty value.
//! Plug a real credential service in through [`KeyValidator`].

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header::InvalidHeaderName, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

use crate::api::ApiError;
use crate::config::AuthConfig;
use crate::routing::Middleware;

/// Decides whether a presented key is acceptable.
pub trait KeyValidator: Send + Sync + 'static {
    fn accepts(&self, key: &HeaderValue) -> bool;
}

/// Accepts any non-empty key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceOnly;

impl KeyValidator for PresenceOnly {
    fn accepts(&self, key: &HeaderValue) -> bool {
        !key.is_empty()
    }
}

/// Rejects requests without an acceptable API key with 401.
#[derive(Clone)]
pub struct ApiKeyAuth {
    header: HeaderName,
    validator: Arc<dyn KeyValidator>,
}

impl ApiKeyAuth {
    pub fn new(header: HeaderName) -> Self {
        Self::with_validator(header, PresenceOnly)
    }

    pub fn with_validator<V: KeyValidator>(header: HeaderName, validator: V) -> Self {
        Self {
            header,
            validator: Arc::new(validator),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Result<Self, InvalidHeaderName> {
        let header = HeaderName::from_bytes(config.api_key_header.as_bytes())?;
        Ok(Self::new(header))
    }

    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    fn is_authorized(&self, request: &Request) -> bool {
        request
            .headers()
            .get(&self.header)
            .is_some_and(|key| self.validator.accepts(key))
    }
}

impl Middleware for ApiKeyAuth {
    fn name(&self) -> &'static str {
        "api_key_auth"
    }

    fn handle(&self, request: Request, next: Next) -> BoxFuture<'static, Response> {
        if !self.is_authorized(&request) {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                header = %self.header,
                "Rejected request without API key"
            );
            let response = ApiError::Unauthorized.into_response();
            return Box::pin(async move { response });
        }
        Box::pin(async move { next.run(request).await })
    }
}
