// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! In-memory store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (indexed by social identity)
//! - Wallets and onboarding progress (one per user)
//! - Tokens and per-user balances
//! - Missions and per-user mission state
//!
//! Every read-modify-write runs under the DashMap entry lock of the record
//! it touches, so concurrent requests for the same user never lose updates.

use crate::models::{
    Mission, NewToken, NewUser, OnboardingProgress, Token, User, UserMission, UserTokenBalance,
    Wallet,
};
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// (provider, social_id)
type SocialKey = (String, String);
/// (user_id, token_id) or (user_id, mission_id)
type UserScopedKey = (String, String);

#[derive(Default)]
struct Tables {
    users: DashMap<String, User>,
    users_by_social: DashMap<SocialKey, String>,
    /// Keyed by user id; a user has at most one wallet.
    wallets: DashMap<String, Wallet>,
    /// Keyed by user id.
    onboarding: DashMap<String, OnboardingProgress>,
    /// Keyed by token id, with insertion sequence for stable listing.
    tokens: DashMap<String, (u64, Token)>,
    balances: DashMap<UserScopedKey, UserTokenBalance>,
    /// Keyed by mission id, with insertion sequence for stable listing.
    missions: DashMap<String, (u64, Mission)>,
    user_missions: DashMap<UserScopedKey, UserMission>,
    sequence: AtomicU64,
}

/// Process-local database. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the default tokens and missions.
    pub fn seeded() -> Self {
        let store = Self::new();
        crate::db::seed::seed_defaults(&store, Utc::now());
        store
    }

    fn next_sequence(&self) -> u64 {
        self.tables.sequence.fetch_add(1, Ordering::Relaxed)
    }

    // ─── User Operations ─────────────────────────────────────────

    pub fn get_user(&self, id: &str) -> Option<User> {
        self.tables.users.get(id).map(|u| u.clone())
    }

    pub fn get_user_by_social_id(&self, social_id: &str, provider: &str) -> Option<User> {
        let key = (provider.to_string(), social_id.to_string());
        let user_id = self.tables.users_by_social.get(&key)?.clone();
        self.get_user(&user_id)
    }

    /// Insert a user without onboarding state. Fails if the social identity
    /// is already registered, returning the existing user.
    pub fn create_user(&self, new_user: NewUser, now: DateTime<Utc>) -> Result<User, User> {
        let (user, created) = self.insert_user_once(new_user, now, |_| {});
        if created {
            Ok(user)
        } else {
            Err(user)
        }
    }

    /// Look up a user by social identity, creating the user and a fresh
    /// onboarding progress on first sight. Returns `(user, created)`.
    pub fn find_or_create_user(&self, new_user: NewUser, now: DateTime<Utc>) -> (User, bool) {
        self.insert_user_once(new_user, now, |user| {
            self.create_onboarding_progress(OnboardingProgress::new(&user.id, now));
        })
    }

    fn insert_user_once(
        &self,
        new_user: NewUser,
        now: DateTime<Utc>,
        on_create: impl FnOnce(&User),
    ) -> (User, bool) {
        let key = (new_user.provider.clone(), new_user.social_id.clone());
        match self.tables.users_by_social.entry(key) {
            Entry::Occupied(entry) => match self.get_user(entry.get()) {
                Some(user) => (user, false),
                None => {
                    // Index points at a missing user; rebuild it.
                    let user = new_user.into_user(now);
                    self.tables.users.insert(user.id.clone(), user.clone());
                    on_create(&user);
                    *entry.into_ref() = user.id.clone();
                    (user, true)
                }
            },
            Entry::Vacant(entry) => {
                let user = new_user.into_user(now);
                self.tables.users.insert(user.id.clone(), user.clone());
                on_create(&user);
                entry.insert(user.id.clone());
                (user, true)
            }
        }
    }

    // ─── Wallet Operations ───────────────────────────────────────

    pub fn get_wallet_by_user_id(&self, user_id: &str) -> Option<Wallet> {
        self.tables.wallets.get(user_id).map(|w| w.clone())
    }

    /// Insert the wallet built by `build` unless the user already has one.
    /// Returns `(wallet, created)`.
    pub fn create_wallet_if_absent(
        &self,
        user_id: &str,
        build: impl FnOnce() -> Wallet,
    ) -> (Wallet, bool) {
        match self.tables.wallets.entry(user_id.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let wallet = build();
                entry.insert(wallet.clone());
                (wallet, true)
            }
        }
    }

    pub fn update_wallet(&self, user_id: &str, update: impl FnOnce(&mut Wallet)) -> Option<Wallet> {
        let mut wallet = self.tables.wallets.get_mut(user_id)?;
        update(&mut wallet);
        Some(wallet.clone())
    }

    // ─── Onboarding Operations ───────────────────────────────────

    pub fn get_onboarding_progress(&self, user_id: &str) -> Option<OnboardingProgress> {
        self.tables.onboarding.get(user_id).map(|p| p.clone())
    }

    pub fn create_onboarding_progress(&self, progress: OnboardingProgress) -> OnboardingProgress {
        self.tables
            .onboarding
            .insert(progress.user_id.clone(), progress.clone());
        progress
    }

    /// Mutate progress in place and bump `updated_at`.
    pub fn update_onboarding_progress(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        update: impl FnOnce(&mut OnboardingProgress),
    ) -> Option<OnboardingProgress> {
        let mut progress = self.tables.onboarding.get_mut(user_id)?;
        update(&mut progress);
        progress.updated_at = now;
        Some(progress.clone())
    }

    // ─── Token Operations ────────────────────────────────────────

    /// All tokens in registration order.
    pub fn get_tokens(&self) -> Vec<Token> {
        let mut tokens: Vec<(u64, Token)> = self
            .tables
            .tokens
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        tokens.sort_by_key(|(seq, _)| *seq);
        tokens.into_iter().map(|(_, t)| t).collect()
    }

    pub fn get_token(&self, id: &str) -> Option<Token> {
        self.tables.tokens.get(id).map(|entry| entry.1.clone())
    }

    pub fn get_token_by_address(&self, address: &str, chain_id: &str) -> Option<Token> {
        self.tables
            .tokens
            .iter()
            .find(|entry| entry.1.matches(address, chain_id))
            .map(|entry| entry.1.clone())
    }

    pub fn create_token(&self, new_token: NewToken, now: DateTime<Utc>) -> Token {
        let token = new_token.into_token(now);
        let seq = self.next_sequence();
        self.tables
            .tokens
            .insert(token.id.clone(), (seq, token.clone()));
        token
    }

    // ─── Balance Operations ──────────────────────────────────────

    pub fn get_user_token_balance(&self, user_id: &str, token_id: &str) -> Option<UserTokenBalance> {
        self.tables
            .balances
            .get(&(user_id.to_string(), token_id.to_string()))
            .map(|b| b.clone())
    }

    pub fn get_user_token_balances(&self, user_id: &str) -> Vec<UserTokenBalance> {
        let mut balances: Vec<UserTokenBalance> = self
            .tables
            .balances
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        balances.sort_by(|a, b| a.updated_at.cmp(&b.updated_at).then_with(|| a.id.cmp(&b.id)));
        balances
    }

    /// Upsert a balance record under its entry lock.
    ///
    /// A missing record starts at zero. If `update` fails, a fresh record is
    /// not inserted; `update` must not mutate before deciding to fail.
    pub fn update_user_token_balance<R, E>(
        &self,
        user_id: &str,
        token_id: &str,
        now: DateTime<Utc>,
        update: impl FnOnce(&mut UserTokenBalance) -> Result<R, E>,
    ) -> Result<(UserTokenBalance, R), E> {
        match self
            .tables
            .balances
            .entry((user_id.to_string(), token_id.to_string()))
        {
            Entry::Occupied(mut entry) => {
                let out = update(entry.get_mut())?;
                Ok((entry.get().clone(), out))
            }
            Entry::Vacant(entry) => {
                let mut balance = UserTokenBalance::new(user_id, token_id, now);
                let out = update(&mut balance)?;
                entry.insert(balance.clone());
                Ok((balance, out))
            }
        }
    }

    // ─── Mission Operations ──────────────────────────────────────

    /// Active missions in creation order.
    pub fn get_missions(&self) -> Vec<Mission> {
        let mut missions: Vec<(u64, Mission)> = self
            .tables
            .missions
            .iter()
            .filter(|entry| entry.1.is_active)
            .map(|entry| entry.value().clone())
            .collect();
        missions.sort_by_key(|(seq, _)| *seq);
        missions.into_iter().map(|(_, m)| m).collect()
    }

    pub fn get_mission(&self, id: &str) -> Option<Mission> {
        self.tables.missions.get(id).map(|entry| entry.1.clone())
    }

    pub fn create_mission(&self, mission: Mission) -> Mission {
        let seq = self.next_sequence();
        self.tables
            .missions
            .insert(mission.id.clone(), (seq, mission.clone()));
        mission
    }

    // ─── User Mission Operations ─────────────────────────────────

    pub fn get_user_missions(&self, user_id: &str) -> Vec<UserMission> {
        self.tables
            .user_missions
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn get_user_mission(&self, user_id: &str, mission_id: &str) -> Option<UserMission> {
        self.tables
            .user_missions
            .get(&(user_id.to_string(), mission_id.to_string()))
            .map(|m| m.clone())
    }

    /// Upsert a user mission under its entry lock. A missing record starts
    /// as `pending`. Same failure contract as `update_user_token_balance`.
    pub fn upsert_user_mission<R, E>(
        &self,
        user_id: &str,
        mission_id: &str,
        now: DateTime<Utc>,
        update: impl FnOnce(&mut UserMission) -> Result<R, E>,
    ) -> Result<(UserMission, R), E> {
        match self
            .tables
            .user_missions
            .entry((user_id.to_string(), mission_id.to_string()))
        {
            Entry::Occupied(mut entry) => {
                let out = update(entry.get_mut())?;
                Ok((entry.get().clone(), out))
            }
            Entry::Vacant(entry) => {
                let mut user_mission = UserMission::new(user_id, mission_id, now);
                let out = update(&mut user_mission)?;
                entry.insert(user_mission.clone());
                Ok((user_mission, out))
            }
        }
    }

    /// Mutate an existing user mission; `None` if the user never started it.
    pub fn update_user_mission<R, E>(
        &self,
        user_id: &str,
        mission_id: &str,
        update: impl FnOnce(&mut UserMission) -> Result<R, E>,
    ) -> Option<Result<(UserMission, R), E>> {
        let mut entry = self
            .tables
            .user_missions
            .get_mut(&(user_id.to_string(), mission_id.to_string()))?;
        Some(update(&mut entry).map(|out| (entry.clone(), out)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};
    use std::convert::Infallible;

    fn new_user(social_id: &str) -> NewUser {
        NewUser {
            social_id: social_id.to_string(),
            provider: "Google".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_find_or_create_user_is_idempotent() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let (first, created) = store.find_or_create_user(new_user("g_1"), now);
        assert!(created);
        let (second, created_again) = store.find_or_create_user(new_user("g_1"), now);
        assert!(!created_again);
        assert_eq!(first.id, second.id);

        let progress = store.get_onboarding_progress(&first.id).unwrap();
        assert_eq!(progress.current_step, 1);
        assert!(progress.completed_steps.is_empty());
    }

    #[test]
    fn test_social_identity_is_scoped_by_provider() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let (google, _) = store.find_or_create_user(new_user("same"), now);
        let (facebook, created) = store.find_or_create_user(
            NewUser {
                provider: "Facebook".to_string(),
                ..new_user("same")
            },
            now,
        );
        assert!(created);
        assert_ne!(google.id, facebook.id);
        assert_eq!(
            store.get_user_by_social_id("same", "Facebook").unwrap().id,
            facebook.id
        );
    }

    #[test]
    fn test_create_user_rejects_duplicate_identity() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let created = store.create_user(new_user("dup"), now).unwrap();
        let existing = store.create_user(new_user("dup"), now).unwrap_err();
        assert_eq!(created.id, existing.id);
        assert!(store.get_onboarding_progress(&created.id).is_none());
    }

    #[test]
    fn test_wallet_created_once_per_user() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let (first, created) =
            store.create_wallet_if_absent("u1", || Wallet::new("u1", Address::random(), false, None, now));
        assert!(created);
        let (second, created_again) =
            store.create_wallet_if_absent("u1", || Wallet::new("u1", Address::random(), true, None, now));
        assert!(!created_again);
        assert_eq!(first.address, second.address);
        assert!(!second.biometric_enabled);
    }

    #[test]
    fn test_failed_balance_update_does_not_insert() {
        let store = MemoryStore::new();
        let result: Result<(UserTokenBalance, ()), &str> =
            store.update_user_token_balance("u1", "t1", Utc::now(), |_| Err("nope"));
        assert!(result.is_err());
        assert!(store.get_user_token_balance("u1", "t1").is_none());
    }

    #[test]
    fn test_balance_upsert_accumulates() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for _ in 0..3 {
            store
                .update_user_token_balance::<_, Infallible>("u1", "t1", now, |b| {
                    b.credit(U256::from(2u64), now);
                    Ok(())
                })
                .unwrap();
        }
        let balance = store.get_user_token_balance("u1", "t1").unwrap();
        assert_eq!(balance.balance, U256::from(6u64));
        assert_eq!(store.get_user_token_balances("u1").len(), 1);
        assert!(store.get_user_token_balances("u2").is_empty());
    }

    #[test]
    fn test_seeded_store_lists_in_creation_order() {
        let store = MemoryStore::seeded();
        let symbols: Vec<String> = store.get_tokens().into_iter().map(|t| t.symbol).collect();
        assert_eq!(symbols, vec!["FUSE", "MEE"]);

        let missions: Vec<String> = store.get_missions().into_iter().map(|m| m.id).collect();
        assert_eq!(
            missions,
            vec!["create_wallet", "connect_dapp", "enable_biometric"]
        );
    }
}
