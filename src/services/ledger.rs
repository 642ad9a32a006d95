// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Token ledger: credits and balance views.

use crate::db::MemoryStore;
use crate::error::AppError;
use crate::models::amount::parse_decimal;
use crate::models::{BalanceWithToken, Token, UserTokenBalance};
use alloy_primitives::U256;
use chrono::{DateTime, Utc};

/// Convert a whole-token amount into base units (`whole * 10^decimals`).
pub fn to_base_units(whole: U256, decimals: u8) -> Result<U256, AppError> {
    U256::from(10u64)
        .checked_pow(U256::from(decimals))
        .and_then(|scale| whole.checked_mul(scale))
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "amount {whole} with {decimals} decimals overflows"
            ))
        })
}

/// Parse a decimal whole-token string and scale it to base units.
pub fn parse_whole_units(whole: &str, decimals: u8) -> Result<U256, AppError> {
    let value = parse_decimal(whole).map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    to_base_units(value, decimals)
}

/// Ledger operations over the store.
#[derive(Clone)]
pub struct LedgerService {
    store: MemoryStore,
}

impl LedgerService {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Credit `amount` base units of `token` to a user.
    pub fn credit(
        &self,
        user_id: &str,
        token: &Token,
        amount: U256,
        now: DateTime<Utc>,
    ) -> Result<UserTokenBalance, AppError> {
        let (balance, ()) =
            self.store
                .update_user_token_balance(user_id, &token.id, now, |balance| {
                    balance.credit(amount, now).ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!("balance overflow for {}", token.symbol))
                    })
                })?;

        tracing::info!(
            user_id = %user_id,
            token = %token.symbol,
            amount = %amount,
            balance = %balance.balance,
            "Credited tokens"
        );
        Ok(balance)
    }

    /// All balances of a user with their token details attached.
    pub fn balances_with_tokens(&self, user_id: &str) -> Vec<BalanceWithToken> {
        self.store
            .get_user_token_balances(user_id)
            .into_iter()
            .map(|balance| {
                let token = self.store.get_token(&balance.token_id);
                BalanceWithToken { balance, token }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tokens;

    #[test]
    fn test_to_base_units_scales_by_decimals() {
        let amount = to_base_units(U256::from(5u64), 18).unwrap();
        assert_eq!(amount.to_string(), "5000000000000000000");
        assert_eq!(to_base_units(U256::from(7u64), 0).unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_to_base_units_overflow_is_error() {
        assert!(to_base_units(U256::MAX, 1).is_err());
    }

    #[test]
    fn test_parse_whole_units_rejects_garbage() {
        assert!(parse_whole_units("ten", 18).is_err());
        assert_eq!(
            parse_whole_units("100", 18).unwrap().to_string(),
            "100000000000000000000"
        );
    }

    #[test]
    fn test_credit_and_list_balances() {
        let store = MemoryStore::seeded();
        let ledger = LedgerService::new(store.clone());
        let mee = store
            .get_tokens()
            .into_iter()
            .find(|t| t.symbol == tokens::MEE)
            .unwrap();

        let now = Utc::now();
        ledger.credit("u1", &mee, U256::from(3u64), now).unwrap();
        let balance = ledger.credit("u1", &mee, U256::from(4u64), now).unwrap();
        assert_eq!(balance.balance, U256::from(7u64));
        assert_eq!(balance.total_earned, U256::from(7u64));

        let views = ledger.balances_with_tokens("u1");
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].token.as_ref().unwrap().symbol, tokens::MEE);
    }
}
