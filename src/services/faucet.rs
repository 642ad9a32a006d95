// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Test-token faucet with a per-user, per-token cooldown.

use crate::config::MAX_DURATION_SECS;
use crate::db::MemoryStore;
use crate::error::AppError;
use crate::services::ledger::to_base_units;
use crate::time_utils::seconds_until_ceil;
use alloy_primitives::U256;
use chrono::{DateTime, Duration, Utc};

/// Result of a successful faucet claim.
#[derive(Debug, Clone)]
pub struct FaucetGrant {
    /// Base units credited
    pub amount: U256,
    pub token_symbol: String,
    /// Earliest time the next claim succeeds
    pub next_claim: DateTime<Utc>,
}

#[derive(Clone)]
pub struct FaucetService {
    store: MemoryStore,
    whole_amount: u64,
    cooldown: Duration,
}

impl FaucetService {
    /// `cooldown_secs` is clamped to `0..=MAX_DURATION_SECS`.
    pub fn new(store: MemoryStore, whole_amount: u64, cooldown_secs: i64) -> Self {
        let cooldown = Duration::try_seconds(cooldown_secs.clamp(0, MAX_DURATION_SECS))
            .unwrap_or_else(Duration::zero);
        Self {
            store,
            whole_amount,
            cooldown,
        }
    }

    /// Grant faucet tokens unless the user claimed this token within the
    /// cooldown window. The check and the credit share one entry lock.
    pub fn request(
        &self,
        user_id: &str,
        token_address: &str,
        chain_id: &str,
        now: DateTime<Utc>,
    ) -> Result<FaucetGrant, AppError> {
        let token = self
            .store
            .get_token_by_address(token_address, chain_id)
            .ok_or_else(|| AppError::NotFound("Token not found".to_string()))?;

        let amount = to_base_units(U256::from(self.whole_amount), token.decimals)?;
        let cooldown = self.cooldown;

        let (balance, ()) =
            self.store
                .update_user_token_balance(user_id, &token.id, now, |balance| {
                    if let Some(last) = balance.last_faucet_claim {
                        let ready_at = last + cooldown;
                        if ready_at > now {
                            return Err(AppError::FaucetCooldown {
                                retry_after_secs: seconds_until_ceil(now, ready_at),
                            });
                        }
                    }
                    balance.credit(amount, now).ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!("balance overflow for {}", token.symbol))
                    })?;
                    balance.last_faucet_claim = Some(now);
                    Ok(())
                })
                .inspect_err(|err| {
                    if let AppError::FaucetCooldown { retry_after_secs } = err {
                        tracing::debug!(
                            user_id = %user_id,
                            token = %token.symbol,
                            retry_after_secs,
                            "Faucet request rejected by cooldown"
                        );
                    }
                })?;

        tracing::info!(
            user_id = %user_id,
            token = %token.symbol,
            amount = %amount,
            balance = %balance.balance,
            "Faucet tokens granted"
        );

        Ok(FaucetGrant {
            amount,
            token_symbol: token.symbol,
            next_claim: now + cooldown,
        })
    }
}
