// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Smart wallet provisioning.
//!
//! Addresses are 20 random bytes. No key material is generated or held.

use crate::db::MemoryStore;
use crate::error::AppError;
use crate::models::onboarding::STEP_BIOMETRIC;
use crate::models::Wallet;
use alloy_primitives::Address;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct WalletService {
    store: MemoryStore,
}

impl WalletService {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Return the user's wallet, provisioning it on first call.
    ///
    /// A new wallet inherits security settings parked during onboarding.
    /// Returns `(wallet, created)`.
    pub fn provision(
        &self,
        user_id: &str,
        biometric_requested: bool,
        now: DateTime<Utc>,
    ) -> Result<(Wallet, bool), AppError> {
        if self.store.get_user(user_id).is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        // Parked settings are taken while the wallet entry is locked, so a
        // concurrent PIN setup either lands here or finds the new wallet.
        let (wallet, created) = self.store.create_wallet_if_absent(user_id, || {
            let mut biometric_enabled = biometric_requested;
            let mut pin_hash = None;
            self.store.update_onboarding_progress(user_id, now, |progress| {
                biometric_enabled |= progress.has_step(STEP_BIOMETRIC);
                pin_hash = progress.pending_pin_hash.take();
            });
            Wallet::new(user_id, Address::random(), biometric_enabled, pin_hash, now)
        });

        if created {
            tracing::info!(
                user_id = %user_id,
                address = %wallet.address,
                biometric_enabled = wallet.biometric_enabled,
                pin_set = wallet.pin_set(),
                "Smart wallet provisioned"
            );
        } else {
            tracing::debug!(user_id = %user_id, "Wallet already exists");
        }

        Ok((wallet, created))
    }

    pub fn get(&self, user_id: &str) -> Result<Wallet, AppError> {
        self.store
            .get_wallet_by_user_id(user_id)
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))
    }
}
