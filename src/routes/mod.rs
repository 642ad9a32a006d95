// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! HTTP route handlers.

pub mod api;
pub mod auth;
pub mod rewards;
pub mod tokens;

use crate::middleware::{auth::require_auth, security::add_security_headers};
use crate::AppState;
use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id: option_env!("BUILD_ID").unwrap_or("unknown").to_string(),
    })
}

/// Local dev servers, with an optional numeric port.
const DEV_ORIGINS: &[&str] = &["http://localhost", "http://127.0.0.1"];

/// The configured frontend plus local dev servers.
fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url
        || DEV_ORIGINS.iter().any(|host| {
            origin.strip_prefix(host).is_some_and(|rest| {
                rest.is_empty()
                    || rest
                        .strip_prefix(':')
                        .is_some_and(|port| {
                            port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok()
                        })
            })
        })
}

fn cors_layer(frontend_url: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| is_allowed_origin(origin, &frontend_url))
            },
        ))
        // Session cookie travels cross-origin from the wallet UI
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// Build the complete router: public sign-in and token registry, plus the
/// session-guarded onboarding, wallet and rewards API.
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes())
        .merge(tokens::routes());

    let guarded = Router::new()
        .merge(api::routes())
        .merge(rewards::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(guarded)
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors_layer(state.config.frontend_url.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins() {
        let frontend = "https://wallet.meechain.app";
        assert!(is_allowed_origin(frontend, frontend));
        assert!(is_allowed_origin("http://localhost:5173", frontend));
        assert!(is_allowed_origin("http://127.0.0.1:3000", frontend));
        assert!(!is_allowed_origin("https://evil.example", frontend));
        assert!(is_allowed_origin("http://localhost", frontend));
        assert!(!is_allowed_origin("https://wallet.meechain.app.evil", frontend));
        assert!(!is_allowed_origin("http://localhost.evil", frontend));
        assert!(!is_allowed_origin("http://localhost.attacker.tld:5173", frontend));
        assert!(!is_allowed_origin("http://127.0.0.1.nip.io", frontend));
        assert!(!is_allowed_origin("http://localhost:", frontend));
        assert!(!is_allowed_origin("http://localhost:+80", frontend));
        assert!(!is_allowed_origin("http://localhost:80/x", frontend));
        assert!(!is_allowed_origin("https://localhost:5173", frontend));
    }
}
