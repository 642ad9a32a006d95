// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Missions and per-user mission state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RewardType {
    Token,
    Badge,
}

/// Lifecycle: pending -> completed -> claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MissionStatus {
    #[default]
    Pending,
    Completed,
    Claimed,
}

/// A mission definition. The id is a fixed slug such as `create_wallet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub reward_type: RewardType,
    /// Reward in whole token units
    pub reward_amount: String,
    pub reward_token_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A user's progress on one mission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserMission {
    pub id: String,
    pub user_id: String,
    pub mission_id: String,
    pub status: MissionStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub completed_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub claimed_at: Option<DateTime<Utc>>,
    /// Free-form evidence supplied by the client
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub proof: Option<serde_json::Value>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl UserMission {
    pub fn new(user_id: &str, mission_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            mission_id: mission_id.to_string(),
            status: MissionStatus::Pending,
            completed_at: None,
            claimed_at: None,
            proof: None,
            created_at: now,
        }
    }
}

/// Reward description included in mission responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MissionReward {
    #[serde(rename = "type")]
    pub reward_type: RewardType,
    pub amount: String,
    /// Token symbol, if the reward is paid in a known token
    pub token: Option<String>,
}
