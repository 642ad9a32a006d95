// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Mission completion, reward grants and claims.

use crate::db::{missions, MemoryStore};
use crate::error::AppError;
use crate::models::{Mission, MissionReward, MissionStatus, RewardType, Token, UserMission};
use crate::services::ledger::{parse_whole_units, LedgerService};
use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::convert::Infallible;

/// Alias the onboarding screen uses for the first mission.
pub const FIRST_MISSION_ALIAS: &str = "first";

/// A mission joined with one user's progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionListItem {
    pub mission_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: MissionStatus,
    pub reward: MissionReward,
    pub completed_at: Option<DateTime<Utc>>,
    pub claimed_at: Option<DateTime<Utc>>,
}

/// Outcome of completing a mission.
#[derive(Debug, Clone)]
pub struct Completion {
    pub user_mission: UserMission,
    /// Present only when this call moved the mission into `completed`
    pub reward_granted: Option<MissionReward>,
}

#[derive(Clone)]
pub struct MissionService {
    store: MemoryStore,
    ledger: LedgerService,
}

impl MissionService {
    pub fn new(store: MemoryStore, ledger: LedgerService) -> Self {
        Self { store, ledger }
    }

    fn reward_of(&self, mission: &Mission) -> MissionReward {
        let token = mission
            .reward_token_id
            .as_deref()
            .and_then(|id| self.store.get_token(id))
            .map(|t| t.symbol);
        MissionReward {
            reward_type: mission.reward_type,
            amount: mission.reward_amount.clone(),
            token,
        }
    }

    /// Active missions with the user's status (`pending` if never started).
    pub fn list(&self, user_id: &str) -> Vec<MissionListItem> {
        let user_missions = self.store.get_user_missions(user_id);
        self.store
            .get_missions()
            .into_iter()
            .map(|mission| {
                let progress = user_missions.iter().find(|um| um.mission_id == mission.id);
                MissionListItem {
                    reward: self.reward_of(&mission),
                    mission_id: mission.id,
                    title: mission.title,
                    description: mission.description,
                    status: progress.map(|um| um.status).unwrap_or_default(),
                    completed_at: progress.and_then(|um| um.completed_at),
                    claimed_at: progress.and_then(|um| um.claimed_at),
                }
            })
            .collect()
    }

    /// Mark a mission completed and grant its token reward.
    ///
    /// The reward is paid only on the transition into `completed`. If the
    /// credit fails the mission goes back to `pending`.
    pub fn complete(
        &self,
        user_id: &str,
        mission_id: &str,
        proof: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Result<Completion, AppError> {
        let mission = self
            .store
            .get_mission(mission_id)
            .ok_or_else(|| AppError::NotFound("Mission not found".to_string()))?;
        let payout = self.token_payout(&mission)?;

        let (user_mission, transitioned) = self.store.upsert_user_mission::<_, AppError>(
            user_id,
            mission_id,
            now,
            |um| {
                if um.status != MissionStatus::Pending {
                    return Ok(false);
                }
                um.status = MissionStatus::Completed;
                um.completed_at = Some(now);
                um.proof = proof;
                Ok(true)
            },
        )?;

        if !transitioned {
            tracing::debug!(
                user_id = %user_id,
                mission_id = %mission_id,
                status = ?user_mission.status,
                "Mission already completed, no reward"
            );
            return Ok(Completion {
                user_mission,
                reward_granted: None,
            });
        }

        let reward_granted = match payout {
            Some((token, amount)) => {
                if let Err(err) = self.ledger.credit(user_id, &token, amount, now) {
                    self.reopen(user_id, mission_id);
                    tracing::error!(
                        user_id = %user_id,
                        mission_id = %mission_id,
                        error = %err,
                        "Reward credit failed, mission reopened"
                    );
                    return Err(err);
                }
                Some(MissionReward {
                    reward_type: mission.reward_type,
                    amount: mission.reward_amount.clone(),
                    token: Some(token.symbol),
                })
            }
            None => None,
        };

        tracing::info!(
            user_id = %user_id,
            mission_id = %mission_id,
            rewarded = reward_granted.is_some(),
            "Mission completed"
        );

        Ok(Completion {
            user_mission,
            reward_granted,
        })
    }

    /// Token and base-unit amount a mission pays, if it pays a known token.
    fn token_payout(&self, mission: &Mission) -> Result<Option<(Token, U256)>, AppError> {
        if mission.reward_type != RewardType::Token {
            return Ok(None);
        }
        let Some(token) = mission
            .reward_token_id
            .as_deref()
            .and_then(|id| self.store.get_token(id))
        else {
            return Ok(None);
        };

        let amount = parse_whole_units(&mission.reward_amount, token.decimals)?;
        Ok(Some((token, amount)))
    }

    fn reopen(&self, user_id: &str, mission_id: &str) {
        self.store.update_user_mission(user_id, mission_id, |um| {
            um.status = MissionStatus::Pending;
            um.completed_at = None;
            um.proof = None;
            Ok::<_, Infallible>(())
        });
    }

    /// Claim the reward of a completed mission.
    pub fn claim(
        &self,
        user_id: &str,
        mission_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(UserMission, Option<MissionReward>), AppError> {
        let (user_mission, ()) = self
            .store
            .update_user_mission(user_id, mission_id, |um| match um.status {
                MissionStatus::Claimed => {
                    Err(AppError::Conflict("Reward already claimed".to_string()))
                }
                MissionStatus::Pending => {
                    Err(AppError::BadRequest("Mission not completed yet".to_string()))
                }
                MissionStatus::Completed => {
                    um.status = MissionStatus::Claimed;
                    um.claimed_at = Some(now);
                    Ok(())
                }
            })
            .ok_or_else(|| AppError::NotFound("User mission not found".to_string()))??;

        tracing::info!(user_id = %user_id, mission_id = %mission_id, "Mission reward claimed");

        let reward = self
            .store
            .get_mission(mission_id)
            .filter(|m| m.reward_token_id.is_some())
            .map(|m| self.reward_of(&m));
        Ok((user_mission, reward))
    }

    /// Onboarding's first mission: flags progress and completes
    /// `create_wallet`. Other ids are accepted and ignored.
    pub fn complete_onboarding_mission(
        &self,
        user_id: &str,
        mission_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MissionReward, AppError> {
        let mission = self
            .store
            .get_mission(missions::CREATE_WALLET)
            .ok_or_else(|| AppError::NotFound("Mission not found".to_string()))?;

        if mission_id == FIRST_MISSION_ALIAS || mission_id == missions::CREATE_WALLET {
            self.complete(
                user_id,
                missions::CREATE_WALLET,
                Some(serde_json::json!({ "source": "onboarding" })),
                now,
            )?;
            self.store.update_onboarding_progress(user_id, now, |p| {
                p.first_mission_completed = true;
            });
        } else {
            tracing::debug!(mission_id = %mission_id, "Ignoring non-onboarding mission id");
        }

        Ok(self.reward_of(&mission))
    }
}
