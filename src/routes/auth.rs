// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Social sign-in and session routes.
//!
//! The provider handshake happens in the client; this endpoint trusts the
//! identity it is handed and issues a session for it.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE};
use crate::models::{NewUser, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/social", post(social_login))
        .route("/api/auth/logout", post(logout))
}

/// Identity asserted by the client after a social login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SocialLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "Provider and social ID are required"))]
    pub provider: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128, message = "Provider and social ID are required"))]
    pub social_id: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(url)]
    pub profile_image_url: Option<String>,
}

#[derive(Serialize)]
pub struct SocialLoginResponse {
    pub user: User,
    /// Session JWT; also set as an HttpOnly cookie
    pub token: String,
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .build()
}

/// Find or create the user for a social identity and start a session.
async fn social_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<SocialLoginRequest>,
) -> Result<(CookieJar, Json<SocialLoginResponse>)> {
    req.validate()?;

    let (user, created) = state.store.find_or_create_user(
        NewUser {
            social_id: req.social_id,
            provider: req.provider,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image_url: req.profile_image_url,
        },
        chrono::Utc::now(),
    );

    tracing::info!(
        user_id = %user.id,
        provider = %user.provider,
        created,
        "Social login"
    );

    let token = create_jwt(
        &user.id,
        &state.config.jwt_signing_key,
        state.config.session_ttl_secs,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let max_age = i64::try_from(state.config.session_ttl_secs)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("session TTL out of range")))?;
    let mut cookie = session_cookie(&state, token.clone());
    cookie.set_max_age(time::Duration::seconds(max_age));

    Ok((jar.add(cookie), Json(SocialLoginResponse { user, token })))
}

/// Clear the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(session_cookie(&state, String::new()));
    (jar, StatusCode::NO_CONTENT)
}
