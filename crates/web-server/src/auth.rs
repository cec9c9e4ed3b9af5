use crate::{AppState, error::AppError};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use configuration::{AccessConfig, AccessPolicyKind, error::ConfigError};
use std::sync::Arc;

/// What an access policy gets to see about a request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

impl RequestContext {
    pub fn from_request(request: &Request) -> Self {
        Self {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            authorization: request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(String),
}

/// Decides whether a request may reach the mission routes.
pub trait AccessPolicy: Send + Sync {
    fn authorize(&self, context: &RequestContext) -> AccessDecision;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    fn authorize(&self, _context: &RequestContext) -> AccessDecision {
        AccessDecision::Allow
    }
}

/// Admits requests carrying `Authorization: Bearer <token>` with the configured token.
///
/// A policy built with an empty token admits nobody.
#[derive(Debug, Clone)]
pub struct BearerTokenPolicy {
    token: String,
}

impl BearerTokenPolicy {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl AccessPolicy for BearerTokenPolicy {
    fn authorize(&self, context: &RequestContext) -> AccessDecision {
        match context
            .authorization
            .as_deref()
            .and_then(|header| header.strip_prefix("Bearer "))
        {
            Some(presented) if !self.token.is_empty() && presented.trim() == self.token => {
                AccessDecision::Allow
            }
            Some(_) => AccessDecision::Deny("invalid bearer token".to_string()),
            None => AccessDecision::Deny("missing bearer token".to_string()),
        }
    }
}

/// Builds the policy selected in the configuration.
///
/// `bearer-token` without a non-blank token is a configuration error.
pub fn policy_from_config(config: &AccessConfig) -> Result<Arc<dyn AccessPolicy>, ConfigError> {
    match config.policy {
        AccessPolicyKind::AllowAll => Ok(Arc::new(AllowAll)),
        AccessPolicyKind::BearerToken => match config.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(Arc::new(BearerTokenPolicy::new(token))),
            _ => Err(ConfigError::ValidationError(
                "access.token is required when access.policy = \"bearer-token\"".to_string(),
            )),
        },
    }
}

/// Middleware consulting the configured `AccessPolicy` before the handler runs.
pub async fn require_access(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = RequestContext::from_request(&request);
    match state.policy.authorize(&context) {
        AccessDecision::Allow => Ok(next.run(request).await),
        AccessDecision::Deny(reason) => {
            tracing::debug!(method = %context.method, path = %context.path, "Access denied.");
            Err(AppError::Unauthorized(reason))
        }
    }
}
