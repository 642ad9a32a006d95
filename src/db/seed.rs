// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Default tokens and missions loaded at startup.

use super::{missions, tokens, MemoryStore};
use crate::models::{Mission, NewToken, RewardType};
use chrono::{DateTime, Utc};

/// Register the Fuse and MeeChain tokens plus the starter missions.
pub fn seed_defaults(store: &MemoryStore, now: DateTime<Utc>) {
    let fuse = store.create_token(
        NewToken {
            address: "0xa669b1F45F84368fBe48882bF8d1814aae7a4422".to_string(),
            chain_id: tokens::FUSE_CHAIN_ID.to_string(),
            symbol: tokens::FUSE.to_string(),
            name: "Fuse Token".to_string(),
            decimals: 18,
            logo_uri: Some("https://cryptologos.cc/logos/fuse-fuse-logo.png".to_string()),
            is_test_token: false,
            is_reward_eligible: true,
        },
        now,
    );

    let mee = store.create_token(
        NewToken {
            address: "0x0000000000000000000000000000000000000001".to_string(),
            chain_id: tokens::FUSE_CHAIN_ID.to_string(),
            symbol: tokens::MEE.to_string(),
            name: "MeeChain Token".to_string(),
            decimals: 18,
            logo_uri: None,
            is_test_token: true,
            is_reward_eligible: true,
        },
        now,
    );

    let starter = [
        (
            missions::CREATE_WALLET,
            "สร้าง Smart Wallet",
            "สร้าง Smart Wallet พร้อมใช้งานครั้งแรก",
            "100",
            &mee.id,
        ),
        (
            missions::CONNECT_DAPP,
            "เชื่อมต่อ DApp ครั้งแรก",
            "เชื่อมต่อกับ DApp ภายนอกผ่าน WalletConnect",
            "10",
            &fuse.id,
        ),
        (
            missions::ENABLE_BIOMETRIC,
            "เปิดใช้งาน Biometric",
            "เปิดใช้งานการยืนยันตัวตนด้วยลายนิ้วมือ",
            "50",
            &mee.id,
        ),
    ];

    for (id, title, description, amount, token_id) in starter {
        store.create_mission(Mission {
            id: id.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            reward_type: RewardType::Token,
            reward_amount: amount.to_string(),
            reward_token_id: Some(token_id.clone()),
            is_active: true,
            created_at: now,
        });
    }

    tracing::debug!(
        tokens = store.get_tokens().len(),
        missions = store.get_missions().len(),
        "Seeded default tokens and missions"
    );
}
