// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! PIN and biometric setup.
//!
//! Settings chosen before the wallet exists are parked on the onboarding
//! progress and picked up when the wallet is provisioned.

use crate::db::MemoryStore;
use crate::error::AppError;
use crate::models::onboarding::{STEP_BIOMETRIC, STEP_PIN};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Required PIN length.
pub const PIN_LENGTH: usize = 6;

/// Where a security setting was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingTarget {
    Wallet,
    PendingOnboarding,
}

/// Validate that `pin` is exactly six ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), validator::ValidationError> {
    if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("pin_format")
            .with_message("PIN must be exactly 6 digits".into()))
    }
}

#[derive(Clone)]
pub struct SecurityService {
    store: MemoryStore,
    pin_key: Vec<u8>,
}

impl SecurityService {
    pub fn new(store: MemoryStore, pin_key: Vec<u8>) -> Self {
        Self { store, pin_key }
    }

    /// Keyed hash of a PIN, hex encoded.
    pub fn hash_pin(&self, pin: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(&self.pin_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
        mac.update(pin.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Store a PIN hash on the wallet, or park it on onboarding progress
    /// and record the `pin` step.
    pub fn set_pin(
        &self,
        user_id: &str,
        pin: &str,
        now: DateTime<Utc>,
    ) -> Result<SettingTarget, AppError> {
        validate_pin(pin).map_err(|e| AppError::BadRequest(e.to_string()))?;
        let hash = self.hash_pin(pin)?;

        if self.apply_pin_to_wallet(user_id, &hash) {
            tracing::info!(user_id = %user_id, "PIN updated on wallet");
            return Ok(SettingTarget::Wallet);
        }

        self.store
            .update_onboarding_progress(user_id, now, |progress| {
                progress.pending_pin_hash = Some(hash.clone());
                progress.mark_step(STEP_PIN);
            })
            .ok_or_else(|| AppError::NotFound("Onboarding progress not found".to_string()))?;

        // A wallet provisioned since the first check may have missed the
        // parked hash.
        if self.apply_pin_to_wallet(user_id, &hash) {
            self.store.update_onboarding_progress(user_id, now, |progress| {
                if progress.pending_pin_hash.as_deref() == Some(hash.as_str()) {
                    progress.pending_pin_hash = None;
                }
            });
            tracing::info!(user_id = %user_id, "PIN moved to wallet provisioned meanwhile");
            return Ok(SettingTarget::Wallet);
        }

        tracing::info!(user_id = %user_id, "PIN stored pending wallet creation");
        Ok(SettingTarget::PendingOnboarding)
    }

    fn apply_pin_to_wallet(&self, user_id: &str, hash: &str) -> bool {
        self.store
            .update_wallet(user_id, |wallet| wallet.set_pin_hash(hash.to_string()))
            .is_some()
    }

    /// Enable biometric unlock on the wallet, or record the `biometric` step.
    pub fn enable_biometric(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SettingTarget, AppError> {
        let enable_on_wallet = || {
            self.store
                .update_wallet(user_id, |wallet| wallet.biometric_enabled = true)
                .is_some()
        };

        if enable_on_wallet() {
            tracing::info!(user_id = %user_id, "Biometric enabled on wallet");
            return Ok(SettingTarget::Wallet);
        }

        self.store
            .update_onboarding_progress(user_id, now, |progress| {
                progress.mark_step(STEP_BIOMETRIC);
            })
            .ok_or_else(|| AppError::NotFound("Onboarding progress not found".to_string()))?;

        if enable_on_wallet() {
            tracing::info!(user_id = %user_id, "Biometric enabled on wallet provisioned meanwhile");
            return Ok(SettingTarget::Wallet);
        }

        tracing::info!(user_id = %user_id, "Biometric recorded pending wallet creation");
        Ok(SettingTarget::PendingOnboarding)
    }

    /// Check a PIN against the stored hash in constant time.
    pub fn verify_pin(&self, user_id: &str, pin: &str) -> Result<bool, AppError> {
        let stored = self
            .store
            .get_wallet_by_user_id(user_id)
            .and_then(|w| w.pin_hash().map(str::to_string))
            .or_else(|| {
                self.store
                    .get_onboarding_progress(user_id)
                    .and_then(|p| p.pending_pin_hash)
            })
            .ok_or_else(|| AppError::NotFound("No PIN has been set".to_string()))?;

        if validate_pin(pin).is_err() {
            return Ok(false);
        }
        let candidate = self.hash_pin(pin)?;
        Ok(candidate.as_bytes().ct_eq(stored.as_bytes()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, Wallet};
    use alloy_primitives::Address;

    fn setup() -> (SecurityService, MemoryStore, String) {
        let store = MemoryStore::new();
        let (user, _) = store.find_or_create_user(
            NewUser {
                social_id: "g_1".to_string(),
                provider: "Google".to_string(),
                ..Default::default()
            },
            Utc::now(),
        );
        let service = SecurityService::new(store.clone(), b"k".to_vec());
        (service, store, user.id)
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("12345a").is_err());
        assert!(validate_pin("１２３４５６").is_err());
    }

    #[test]
    fn test_hash_depends_on_key() {
        let a = SecurityService::new(MemoryStore::new(), b"a".to_vec());
        let b = SecurityService::new(MemoryStore::new(), b"b".to_vec());
        assert_eq!(a.hash_pin("123456").unwrap().len(), 64);
        assert_ne!(a.hash_pin("123456").unwrap(), b.hash_pin("123456").unwrap());
    }

    #[test]
    fn test_pin_before_wallet_is_parked_once() {
        let (service, store, user_id) = setup();
        let now = Utc::now();

        assert_eq!(
            service.set_pin(&user_id, "123456", now).unwrap(),
            SettingTarget::PendingOnboarding
        );
        service.set_pin(&user_id, "654321", now).unwrap();

        let progress = store.get_onboarding_progress(&user_id).unwrap();
        assert_eq!(progress.completed_steps, vec![STEP_PIN]);
        assert!(service.verify_pin(&user_id, "654321").unwrap());
        assert!(!service.verify_pin(&user_id, "123456").unwrap());
    }

    #[test]
    fn test_settings_apply_to_existing_wallet() {
        let (service, store, user_id) = setup();
        let now = Utc::now();
        store.create_wallet_if_absent(&user_id, || {
            Wallet::new(&user_id, Address::random(), false, None, now)
        });

        assert_eq!(
            service.enable_biometric(&user_id, now).unwrap(),
            SettingTarget::Wallet
        );
        assert_eq!(
            service.set_pin(&user_id, "000000", now).unwrap(),
            SettingTarget::Wallet
        );

        let wallet = store.get_wallet_by_user_id(&user_id).unwrap();
        assert!(wallet.biometric_enabled);
        assert!(wallet.pin_set());
        assert!(store
            .get_onboarding_progress(&user_id)
            .unwrap()
            .completed_steps
            .is_empty());
    }

    #[test]
    fn test_verify_without_pin_is_not_found() {
        let (service, _, user_id) = setup();
        assert!(matches!(
            service.verify_pin(&user_id, "123456"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (service, _, _) = setup();
        assert!(matches!(
            service.enable_biometric("missing", Utc::now()),
            Err(AppError::NotFound(_))
        ));
    }
}
