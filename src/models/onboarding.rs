// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Onboarding progress tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// First onboarding screen.
pub const FIRST_STEP: u8 = 1;
/// Last onboarding screen (completion).
pub const LAST_STEP: u8 = 7;
/// Recorded once a PIN was set before the wallet existed.
pub const STEP_PIN: &str = "pin";
/// Recorded once biometrics were enabled before the wallet existed.
pub const STEP_BIOMETRIC: &str = "biometric";
/// Longest accepted step marker.
pub const MAX_STEP_NAME_LEN: usize = 64;

/// Demo mode uses test tokens only; live mode is the real network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum OnboardingMode {
    Demo,
    Live,
}

/// Per-user onboarding state, created alongside the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OnboardingProgress {
    pub id: String,
    pub user_id: String,
    pub mode: Option<OnboardingMode>,
    pub current_step: u8,
    /// Ordered, duplicate-free list of completed step markers
    pub completed_steps: Vec<String>,
    pub is_completed: bool,
    pub first_mission_completed: bool,
    /// PIN hash held until the wallet is provisioned
    #[serde(skip)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub pending_pin_hash: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl OnboardingProgress {
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            mode: None,
            current_step: FIRST_STEP,
            completed_steps: Vec::new(),
            is_completed: false,
            first_mission_completed: false,
            pending_pin_hash: None,
            updated_at: now,
        }
    }

    pub fn has_step(&self, step: &str) -> bool {
        self.completed_steps.iter().any(|s| s == step)
    }

    /// Record a completed step. Returns `false` if it was already recorded.
    pub fn mark_step(&mut self, step: &str) -> bool {
        if self.has_step(step) {
            return false;
        }
        self.completed_steps.push(step.to_string());
        true
    }

    /// Apply a partial update from the client.
    pub fn apply(&mut self, update: OnboardingUpdate, now: DateTime<Utc>) {
        if let Some(mode) = update.mode {
            self.mode = Some(mode);
        }
        if let Some(step) = update.current_step {
            self.current_step = step;
        }
        if let Some(steps) = update.completed_steps {
            self.completed_steps.clear();
            for step in steps {
                self.mark_step(&step);
            }
        }
        if let Some(done) = update.is_completed {
            self.is_completed = done;
        }
        if let Some(done) = update.first_mission_completed {
            self.first_mission_completed = done;
        }
        self.updated_at = now;
    }
}

/// Partial update accepted by `PUT /api/onboarding/{userId}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingUpdate {
    pub mode: Option<OnboardingMode>,
    #[validate(range(min = 1, max = 7))]
    pub current_step: Option<u8>,
    #[validate(length(max = 32), custom(function = "validate_step_names"))]
    pub completed_steps: Option<Vec<String>>,
    pub is_completed: Option<bool>,
    pub first_mission_completed: Option<bool>,
}

fn validate_step_names(steps: &[String]) -> Result<(), validator::ValidationError> {
    if steps
        .iter()
        .all(|step| !step.is_empty() && step.len() <= MAX_STEP_NAME_LEN)
    {
        Ok(())
    } else {
        Err(validator::ValidationError::new("step_name")
            .with_message("Step names must be 1 to 64 characters".into()))
    }
}
