// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Data models for the application.

pub mod amount;
pub mod mission;
pub mod onboarding;
pub mod token;
pub mod user;
pub mod wallet;

pub use mission::{Mission, MissionReward, MissionStatus, RewardType, UserMission};
pub use onboarding::{OnboardingMode, OnboardingProgress, OnboardingUpdate};
pub use token::{BalanceWithToken, NewToken, Token, UserTokenBalance};
pub use user::{NewUser, User};
pub use wallet::{Wallet, WalletType};
