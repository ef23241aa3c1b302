use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

use crate::state::AppState;

/// A single allow-list entry. Matchers are typed rather than free-form
/// patterns so the list is enumerable and testable on its own.
#[derive(Debug, Clone, PartialEq)]
pub enum OriginMatcher {
    /// `http://localhost:<port>` with any explicit port.
    LocalhostAnyPort,
    /// `https://<subdomain>.<suffix>` for a fixed registrable suffix.
    SecureSubdomainOf(String),
}

impl OriginMatcher {
    fn matches(&self, origin: &Url) -> bool {
        let host = match origin.host_str() {
            Some(h) => h,
            None => return false,
        };

        match self {
            OriginMatcher::LocalhostAnyPort => {
                origin.scheme() == "http" && host == "localhost" && origin.port().is_some()
            }
            OriginMatcher::SecureSubdomainOf(suffix) => {
                origin.scheme() == "https"
                    && host.len() > suffix.len() + 1
                    && host.ends_with(suffix.as_str())
                    && host.as_bytes()[host.len() - suffix.len() - 1] == b'.'
            }
        }
    }
}

/// Ordered allow-list checked against a request's declared origin.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    matchers: Vec<OriginMatcher>,
}

impl OriginPolicy {
    pub fn new(matchers: Vec<OriginMatcher>) -> Self {
        Self { matchers }
    }

    /// The storefront's fixed allow-list: local dev servers on any port and
    /// the deployed frontend's hosting domain.
    pub fn storefront_defaults() -> Self {
        Self::new(vec![
            OriginMatcher::LocalhostAnyPort,
            OriginMatcher::SecureSubdomainOf("netlify.app".to_string()),
        ])
    }

    /// Absent origins are allowed (non-browser callers); present origins
    /// must parse and match at least one entry. Every decision is logged.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        let verdict = match origin {
            None => true,
            Some(raw) => Url::parse(raw)
                .map(|url| self.matchers.iter().any(|m| m.matches(&url)))
                .unwrap_or(false),
        };

        if verdict {
            tracing::info!(origin = origin.unwrap_or("<none>"), "origin check: allowed");
        } else {
            tracing::warn!(origin = origin.unwrap_or("<none>"), "origin check: denied");
        }
        verdict
    }
}

/// Hard admission check at the transport edge. The CORS layer only shapes
/// browser behavior; this layer makes a denied origin an actual rejection
/// before any handler runs.
pub async fn origin_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if !state.origin_policy.allows(origin.as_deref()) {
        let origin = origin.unwrap_or_default();
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": true,
                "message": format!("Origin not allowed by CORS policy: {origin}"),
                "code": "ORIGIN_DENIED"
            })),
        )
            .into_response();
    }

    next.run(request).await
}

/// CORS layer driven by the same policy: preflight answers and response
/// headers mirror only allowed origins, with credentials permitted.
pub fn cors_layer(policy: Arc<OriginPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            policy.allows(origin.to_str().ok())
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
        .allow_credentials(true)
}
