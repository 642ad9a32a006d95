// SPDX-License-Identifier: MIT
// Copyright 2026 MeeChain Contributors

//! Storage layer (in-process, DashMap-backed).

pub mod memory;
pub mod seed;

pub use memory::MemoryStore;

/// Well-known mission ids seeded at startup.
pub mod missions {
    pub const CREATE_WALLET: &str = "create_wallet";
    pub const CONNECT_DAPP: &str = "connect_dapp";
    pub const ENABLE_BIOMETRIC: &str = "enable_biometric";
}

/// Seeded token symbols.
pub mod tokens {
    pub const FUSE: &str = "FUSE";
    pub const MEE: &str = "MEE";
    /// Fuse Network chain id.
    pub const FUSE_CHAIN_ID: &str = "122";
}
