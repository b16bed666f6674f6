//! Assembles the full HTTP application.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::ports::RateLimiter;

use super::checkout::{checkout_routes, CheckoutAppState};
use super::health::health_routes;
use super::middleware::{rate_limit_middleware, security_headers};
use super::webhook::{webhook_routes, WebhookAppState};

/// Preflight cache lifetime.
pub const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Cross-cutting settings of the router.
#[derive(Clone)]
pub struct RouterSettings {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
    /// Guards `/api/checkout` when set.
    pub checkout_rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            checkout_rate_limiter: None,
        }
    }
}

/// Builds the application router.
///
/// - `/health`
/// - `/api/checkout/...` (optionally rate limited)
/// - `/webhooks/:provider`
///
/// Every response carries the security headers; requests are traced and
/// cut off after `request_timeout`.
pub fn build_router(
    checkout: CheckoutAppState,
    webhook: WebhookAppState,
    settings: RouterSettings,
) -> Router {
    let mut checkout_api = checkout_routes().with_state(checkout);
    if let Some(limiter) = settings.checkout_rate_limiter.clone() {
        checkout_api =
            checkout_api.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
    }

    let app: Router = Router::new()
        .merge(health_routes::<()>())
        .nest("/api/checkout", checkout_api)
        .nest("/webhooks", webhook_routes().with_state(webhook));

    security_headers(app)
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the configured origins. `*` allows any origin; an empty
/// list allows none.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}
