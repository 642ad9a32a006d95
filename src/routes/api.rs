// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Onboarding, wallet and security routes for signed-in users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{OnboardingProgress, OnboardingUpdate, User, Wallet};
use crate::services::security::validate_pin;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route(
            "/api/onboarding/{user_id}",
            get(get_onboarding).put(update_onboarding),
        )
        .route("/api/wallet/create", post(create_wallet))
        .route("/api/wallet/{user_id}", get(get_wallet))
        .route("/api/security/pin", post(set_pin))
        .route("/api/security/pin/verify", post(verify_pin))
        .route("/api/security/biometric", post(enable_biometric))
}

/// Body carrying only the acting user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ─── User Profile ────────────────────────────────────────────

async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<User>> {
    let profile = state
        .store
        .get_user(&user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;
    Ok(Json(profile))
}

// ─── Onboarding ──────────────────────────────────────────────

async fn get_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<OnboardingProgress>> {
    user.ensure_owns(&user_id)?;
    let progress = state
        .store
        .get_onboarding_progress(&user_id)
        .ok_or_else(|| AppError::NotFound("Onboarding progress not found".to_string()))?;
    Ok(Json(progress))
}

async fn update_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(update): Json<OnboardingUpdate>,
) -> Result<Json<OnboardingProgress>> {
    user.ensure_owns(&user_id)?;
    update.validate()?;

    tracing::debug!(
        user_id = %user_id,
        mode = ?update.mode,
        current_step = ?update.current_step,
        "Updating onboarding progress"
    );

    let now = chrono::Utc::now();
    let progress = state
        .store
        .update_onboarding_progress(&user_id, now, |progress| progress.apply(update, now))
        .ok_or_else(|| AppError::NotFound("Onboarding progress not found".to_string()))?;
    Ok(Json(progress))
}

// ─── Wallet ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[serde(default)]
    pub biometric_enabled: Option<bool>,
}

#[derive(Serialize)]
pub struct WalletResponse {
    pub wallet: Wallet,
}

/// Provision the user's smart wallet (idempotent).
async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateWalletRequest>,
) -> Result<Json<WalletResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    let (wallet, _) = state.wallets.provision(
        &req.user_id,
        req.biometric_enabled.unwrap_or(false),
        chrono::Utc::now(),
    )?;
    Ok(Json(WalletResponse { wallet }))
}

async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<WalletResponse>> {
    user.ensure_owns(&user_id)?;
    let wallet = state.wallets.get(&user_id)?;
    Ok(Json(WalletResponse { wallet }))
}

// ─── Security ────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PinRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_pin_field"))]
    pub pin: String,
}

fn validate_pin_field(pin: &str) -> std::result::Result<(), validator::ValidationError> {
    validate_pin(pin)
}

async fn set_pin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<PinRequest>,
) -> Result<Json<SuccessResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    state
        .security
        .set_pin(&req.user_id, &req.pin, chrono::Utc::now())?;
    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Serialize)]
pub struct VerifyPinResponse {
    pub valid: bool,
}

async fn verify_pin(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<PinRequest>,
) -> Result<Json<VerifyPinResponse>> {
    if req.user_id.is_empty() {
        return Err(AppError::BadRequest("User ID is required".to_string()));
    }
    user.ensure_owns(&req.user_id)?;

    let valid = state.security.verify_pin(&req.user_id, &req.pin)?;
    if !valid {
        tracing::warn!(user_id = %req.user_id, "PIN verification failed");
    }
    Ok(Json(VerifyPinResponse { valid }))
}

async fn enable_biometric(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UserRequest>,
) -> Result<Json<SuccessResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    state
        .security
        .enable_biometric(&req.user_id, chrono::Utc::now())?;
    Ok(Json(SuccessResponse { success: true }))
}
