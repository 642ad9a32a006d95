// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Smart wallet model.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of wallet provisioned for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WalletType {
    #[default]
    Smart,
}

/// A user's wallet. The address is random, not derived from a key.
///
/// The PIN hash never leaves the server; clients only see `pinSet`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub address: Address,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub biometric_enabled: bool,
    pin_set: bool,
    #[serde(skip)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pin_hash: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    pub fn new(
        user_id: &str,
        address: Address,
        biometric_enabled: bool,
        pin_hash: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            address,
            wallet_type: WalletType::Smart,
            biometric_enabled,
            pin_set: pin_hash.is_some(),
            pin_hash,
            created_at: now,
        }
    }

    pub fn pin_hash(&self) -> Option<&str> {
        self.pin_hash.as_deref()
    }

    pub fn set_pin_hash(&mut self, hash: String) {
        self.pin_hash = Some(hash);
        self.pin_set = true;
    }

    pub fn pin_set(&self) -> bool {
        self.pin_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_hash_is_not_serialized() {
        let mut wallet = Wallet::new("user-1", Address::ZERO, false, None, Utc::now());
        wallet.set_pin_hash("deadbeef".to_string());

        let json = serde_json::to_value(&wallet).unwrap();
        assert_eq!(json["pinSet"], true);
        assert_eq!(json["type"], "smart");
        assert!(json.get("pinHash").is_none());
        assert!(!json.to_string().contains("deadbeef"));
    }
}
