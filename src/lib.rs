pub mod config;
pub mod error;
pub mod state;
pub mod clock;
pub mod models;
pub mod reset;
pub mod routes;
pub mod email;
pub mod rate_limit;
pub mod sweep;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::clock::SystemClock;
use crate::config::Config;
use crate::email::SystemMailer;
use crate::rate_limit::{SendCodeRateLimiter, VerifyRateLimiter};
use crate::reset::ResetService;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> (Router, SharedState) {
    // Build system mailer
    let system_mailer = config.smtp.as_ref().and_then(|smtp| {
        match SystemMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Some(Arc::new(mailer))
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                None
            }
        }
    });

    if config.expose_reset_codes {
        tracing::warn!("Reset codes are exposed in responses (development mode)");
    }

    let state: SharedState = Arc::new(AppState {
        config,
        reset: ResetService::new(Arc::new(SystemClock)),
        system_mailer,
        send_limiter: SendCodeRateLimiter::new(),
        verify_limiter: VerifyRateLimiter::new(),
    });

    // Security headers
    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
