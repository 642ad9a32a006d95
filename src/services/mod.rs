// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Services module - business logic layer.

pub mod faucet;
pub mod ledger;
pub mod missions;
pub mod security;
pub mod wallet;

pub use faucet::{FaucetGrant, FaucetService};
pub use ledger::LedgerService;
pub use missions::{Completion, MissionListItem, MissionService};
pub use security::{SecurityService, SettingTarget};
pub use wallet::WalletService;
