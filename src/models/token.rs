// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Token registry and per-user balances.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An ERC-20 style token known to the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Token {
    pub id: String,
    /// Contract address as configured (original casing preserved)
    pub address: String,
    pub chain_id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub logo_uri: Option<String>,
    pub is_test_token: bool,
    pub is_reward_eligible: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

impl Token {
    /// Case-insensitive address match on the same chain.
    pub fn matches(&self, address: &str, chain_id: &str) -> bool {
        self.chain_id == chain_id && self.address.eq_ignore_ascii_case(address)
    }
}

/// Fields supplied when registering a token.
#[derive(Debug, Clone)]
pub struct NewToken {
    pub address: String,
    pub chain_id: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub logo_uri: Option<String>,
    pub is_test_token: bool,
    pub is_reward_eligible: bool,
}

impl NewToken {
    pub fn into_token(self, now: DateTime<Utc>) -> Token {
        Token {
            id: uuid::Uuid::new_v4().to_string(),
            address: self.address,
            chain_id: self.chain_id,
            symbol: self.symbol,
            name: self.name,
            decimals: self.decimals,
            logo_uri: self.logo_uri,
            is_test_token: self.is_test_token,
            is_reward_eligible: self.is_reward_eligible,
            created_at: now,
        }
    }
}

/// A user's holdings of one token, in base units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserTokenBalance {
    pub id: String,
    pub user_id: String,
    pub token_id: String,
    #[serde(with = "crate::models::amount")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub balance: U256,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_faucet_claim: Option<DateTime<Utc>>,
    /// Lifetime credits (faucet + rewards)
    #[serde(with = "crate::models::amount")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub total_earned: U256,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

impl UserTokenBalance {
    pub fn new(user_id: &str, token_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            token_id: token_id.to_string(),
            balance: U256::ZERO,
            last_faucet_claim: None,
            total_earned: U256::ZERO,
            updated_at: now,
        }
    }

    /// Add `amount` to both the balance and lifetime total.
    ///
    /// Returns `None` (leaving the record untouched) on overflow.
    pub fn credit(&mut self, amount: U256, now: DateTime<Utc>) -> Option<()> {
        let balance = self.balance.checked_add(amount)?;
        let total_earned = self.total_earned.checked_add(amount)?;
        self.balance = balance;
        self.total_earned = total_earned;
        self.updated_at = now;
        Some(())
    }
}

/// Balance with its token details, as returned by `/api/balances`.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceWithToken {
    #[serde(flatten)]
    pub balance: UserTokenBalance,
    pub token: Option<Token>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_accumulates() {
        let now = Utc::now();
        let mut bal = UserTokenBalance::new("u1", "t1", now);
        bal.credit(U256::from(5u64), now).unwrap();
        bal.credit(U256::from(7u64), now).unwrap();
        assert_eq!(bal.balance, U256::from(12u64));
        assert_eq!(bal.total_earned, U256::from(12u64));
    }

    #[test]
    fn test_credit_overflow_leaves_balance_untouched() {
        let now = Utc::now();
        let mut bal = UserTokenBalance::new("u1", "t1", now);
        bal.balance = U256::MAX;
        assert!(bal.credit(U256::from(1u64), now).is_none());
        assert_eq!(bal.balance, U256::MAX);
        assert_eq!(bal.total_earned, U256::ZERO);
    }

    #[test]
    fn test_token_address_match_ignores_case() {
        let token = NewToken {
            address: "0xa669b1F45F84368fBe48882bF8d1814aae7a4422".to_string(),
            chain_id: "122".to_string(),
            symbol: "FUSE".to_string(),
            name: "Fuse Token".to_string(),
            decimals: 18,
            logo_uri: None,
            is_test_token: false,
            is_reward_eligible: true,
        }
        .into_token(Utc::now());

        assert!(token.matches("0xA669B1F45F84368FBE48882BF8D1814AAE7A4422", "122"));
        assert!(!token.matches("0xa669b1F45F84368fBe48882bF8d1814aae7a4422", "1"));
    }
}
