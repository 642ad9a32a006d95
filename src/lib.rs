// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! MeeChain onboarding backend.
//!
//! Social sign-in, PIN/biometric setup, smart wallet provisioning,
//! starter missions and a test-token faucet over an in-memory store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryStore;
use services::{FaucetService, LedgerService, MissionService, SecurityService, WalletService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
    pub ledger: LedgerService,
    pub faucet: FaucetService,
    pub security: SecurityService,
    pub wallets: WalletService,
    pub missions: MissionService,
}

impl AppState {
    /// Wire every service to one store.
    pub fn new(config: Config, store: MemoryStore) -> Self {
        let ledger = LedgerService::new(store.clone());
        Self {
            faucet: FaucetService::new(
                store.clone(),
                config.faucet_amount,
                config.faucet_cooldown_secs,
            ),
            security: SecurityService::new(store.clone(), config.pin_hash_key.clone()),
            wallets: WalletService::new(store.clone()),
            missions: MissionService::new(store.clone(), ledger.clone()),
            ledger,
            store,
            config,
        }
    }
}
