// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development.

use std::env;
use std::str::FromStr;

/// Default faucet grant in whole tokens.
pub const DEFAULT_FAUCET_AMOUNT: u64 = 5;
/// Default faucet cooldown (24 hours).
pub const DEFAULT_FAUCET_COOLDOWN_SECS: i64 = 24 * 60 * 60;
/// Default session lifetime (30 days).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;
/// Upper bound for any configured duration (10 years).
pub const MAX_DURATION_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key used to hash wallet PINs (raw bytes)
    pub pin_hash_key: Vec<u8>,
    /// Whole tokens granted per faucet request
    pub faucet_amount: u64,
    /// Minimum seconds between faucet claims for the same token
    pub faucet_cooldown_secs: i64,
    /// Session JWT lifetime in seconds
    pub session_ttl_secs: u64,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            pin_hash_key: b"test_pin_hash_key".to_vec(),
            faucet_amount: DEFAULT_FAUCET_AMOUNT,
            faucet_cooldown_secs: DEFAULT_FAUCET_COOLDOWN_SECS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_or("PORT", 8080)?,
            jwt_signing_key: required("JWT_SIGNING_KEY")?.into_bytes(),
            pin_hash_key: required("PIN_HASH_KEY")?.into_bytes(),
            faucet_amount: parse_or("FAUCET_AMOUNT", DEFAULT_FAUCET_AMOUNT)?,
            faucet_cooldown_secs: duration_or(
                "FAUCET_COOLDOWN_SECS",
                DEFAULT_FAUCET_COOLDOWN_SECS,
                0,
            )?,
            session_ttl_secs: duration_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS, 1)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Parse a duration in seconds bounded to `min..=MAX_DURATION_SECS`.
fn duration_or<T>(name: &'static str, default: T, min: i64) -> Result<T, ConfigError>
where
    T: TryFrom<i64>,
{
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|secs| (min..=MAX_DURATION_SECS).contains(secs))
        .and_then(|secs| T::try_from(secs).ok())
        .ok_or(ConfigError::Invalid(name, raw))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("PIN_HASH_KEY", "pin_key");
        env::set_var("FAUCET_AMOUNT", "7");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.pin_hash_key, b"pin_key".to_vec());
        assert_eq!(config.faucet_amount, 7);
        assert_eq!(config.faucet_cooldown_secs, DEFAULT_FAUCET_COOLDOWN_SECS);

        env::set_var("FAUCET_AMOUNT", "lots");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("FAUCET_AMOUNT", _)));
        env::remove_var("FAUCET_AMOUNT");
    }

    #[test]
    fn test_duration_bounds() {
        env::set_var("TEST_COOLDOWN_SECS", "-1");
        assert!(matches!(
            duration_or::<i64>("TEST_COOLDOWN_SECS", 5, 0),
            Err(ConfigError::Invalid("TEST_COOLDOWN_SECS", _))
        ));

        env::set_var("TEST_COOLDOWN_SECS", i64::MAX.to_string());
        assert!(duration_or::<i64>("TEST_COOLDOWN_SECS", 5, 0).is_err());

        env::set_var("TEST_COOLDOWN_SECS", "0");
        assert_eq!(duration_or::<i64>("TEST_COOLDOWN_SECS", 5, 0).unwrap(), 0);

        env::set_var("TEST_TTL_SECS", "0");
        assert!(duration_or::<u64>("TEST_TTL_SECS", 5, 1).is_err());
        env::set_var("TEST_TTL_SECS", MAX_DURATION_SECS.to_string());
        assert_eq!(
            duration_or::<u64>("TEST_TTL_SECS", 5, 1).unwrap(),
            MAX_DURATION_SECS as u64
        );

        assert_eq!(duration_or::<u64>("TEST_UNSET_SECS", 7, 1).unwrap(), 7);
        env::remove_var("TEST_COOLDOWN_SECS");
        env::remove_var("TEST_TTL_SECS");
    }
}
