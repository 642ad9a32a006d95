// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Missions, faucet and balance routes.

use crate::db::missions::CREATE_WALLET;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{BalanceWithToken, MissionReward, UserMission};
use crate::services::MissionListItem;
use crate::AppState;
use alloy_primitives::U256;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/mission/complete", post(complete_onboarding_mission))
        .route("/api/faucet/request", post(request_faucet))
        .route("/api/balances/{user_id}", get(get_balances))
        .route("/api/missions/list", get(list_missions))
        .route("/api/missions/complete", post(complete_mission))
        .route("/api/missions/claim", post(claim_mission))
}

// ─── Onboarding Mission ──────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingMissionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[serde(default = "default_onboarding_mission")]
    pub mission_id: String,
}

fn default_onboarding_mission() -> String {
    CREATE_WALLET.to_string()
}

#[derive(Serialize)]
pub struct OnboardingMissionResponse {
    pub success: bool,
    pub reward: MissionReward,
}

/// First-mission endpoint used by the onboarding flow.
async fn complete_onboarding_mission(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<OnboardingMissionRequest>,
) -> Result<Json<OnboardingMissionResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    let reward =
        state
            .missions
            .complete_onboarding_mission(&req.user_id, &req.mission_id, Utc::now())?;
    Ok(Json(OnboardingMissionResponse {
        success: true,
        reward,
    }))
}

// ─── Faucet ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FaucetRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID, token address, and chain ID are required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID, token address, and chain ID are required"))]
    pub token_address: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID, token address, and chain ID are required"))]
    pub chain_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    pub success: bool,
    /// Base units, decimal string
    #[serde(with = "crate::models::amount")]
    pub amount: U256,
    pub token: String,
    pub next_claim: DateTime<Utc>,
}

async fn request_faucet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<FaucetRequest>,
) -> Result<Json<FaucetResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    let grant = state
        .faucet
        .request(&req.user_id, &req.token_address, &req.chain_id, Utc::now())?;

    Ok(Json(FaucetResponse {
        success: true,
        amount: grant.amount,
        token: grant.token_symbol,
        next_claim: grant.next_claim,
    }))
}

// ─── Balances ────────────────────────────────────────────────

async fn get_balances(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<BalanceWithToken>>> {
    user.ensure_owns(&user_id)?;
    Ok(Json(state.ledger.balances_with_tokens(&user_id)))
}

// ─── Missions ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MissionListQuery {
    user_id: Option<String>,
}

async fn list_missions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<MissionListQuery>,
) -> Result<Json<Vec<MissionListItem>>> {
    let user_id = params
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;
    user.ensure_owns(&user_id)?;

    Ok(Json(state.missions.list(&user_id)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MissionRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID and mission ID are required"))]
    pub user_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "User ID and mission ID are required"))]
    pub mission_id: String,
    #[serde(default)]
    pub proof: Option<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteMissionResponse {
    pub status: &'static str,
    pub reward_granted: Option<MissionReward>,
    pub user_mission: UserMission,
}

async fn complete_mission(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<MissionRequest>,
) -> Result<Json<CompleteMissionResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    let completion =
        state
            .missions
            .complete(&req.user_id, &req.mission_id, req.proof, Utc::now())?;

    Ok(Json(CompleteMissionResponse {
        status: "success",
        reward_granted: completion.reward_granted,
        user_mission: completion.user_mission,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMissionResponse {
    pub status: &'static str,
    pub reward: Option<MissionReward>,
    pub user_mission: UserMission,
}

async fn claim_mission(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<MissionRequest>,
) -> Result<Json<ClaimMissionResponse>> {
    req.validate()?;
    user.ensure_owns(&req.user_id)?;

    let (user_mission, reward) = state
        .missions
        .claim(&req.user_id, &req.mission_id, Utc::now())?;

    Ok(Json(ClaimMissionResponse {
        status: "claimed",
        reward,
        user_mission,
    }))
}
