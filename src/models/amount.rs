// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Token amounts as base-10 strings on the wire.
//!
//! `U256` serializes as hex by default; the API exposes integer strings
//! such as `"5000000000000000000"` instead.

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw).map_err(serde::de::Error::custom)
}

/// Parse a non-empty string of ASCII digits into a `U256`.
pub fn parse_decimal(raw: &str) -> Result<U256, String> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid amount {raw:?}: expected decimal digits"));
    }
    U256::from_str_radix(raw, 10).map_err(|e| format!("invalid amount {raw:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        value: U256,
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let w = Wrapper {
            value: U256::from(5_000_000_000_000_000_000u128),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"value":"5000000000000000000"}"#);
    }

    #[test]
    fn test_rejects_hex_and_signs() {
        assert!(parse_decimal("0x10").is_err());
        assert!(parse_decimal("-1").is_err());
        assert!(parse_decimal("").is_err());
        assert_eq!(parse_decimal("42").unwrap(), U256::from(42u64));
    }
}
