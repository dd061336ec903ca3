// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static chain registry.
//!
//! Maps a human-readable chain handle to its numeric chain id, node RPC
//! endpoint, and relay endpoint. Lookup is a pure function over a table
//! fixed at startup; an absent handle is an explicit miss, never a panic.

/// Configuration for a single supported chain.
///
/// The node RPC endpoint serves read-only queries (block number probes);
/// the relay endpoint receives signed transaction submissions. They are
/// distinct services and both are threaded into session construction from
/// this struct, never hardcoded at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain handle used in requests and configuration (e.g., "polygon")
    pub handle: &'static str,
    /// Numeric chain id
    pub chain_id: u64,
    /// Node RPC endpoint URL (read path)
    pub rpc_url: &'static str,
    /// Relay endpoint URL (transaction submission path)
    pub relay_url: &'static str,
}

/// Ethereum mainnet.
pub const MAINNET: ChainConfig = ChainConfig {
    handle: "mainnet",
    chain_id: 1,
    rpc_url: "https://nodes.sequence.app/mainnet",
    relay_url: "https://mainnet-relayer.sequence.app",
};

/// Polygon PoS.
pub const POLYGON: ChainConfig = ChainConfig {
    handle: "polygon",
    chain_id: 137,
    rpc_url: "https://nodes.sequence.app/polygon",
    relay_url: "https://polygon-relayer.sequence.app",
};

/// Polygon Mumbai testnet.
pub const MUMBAI: ChainConfig = ChainConfig {
    handle: "mumbai",
    chain_id: 80001,
    rpc_url: "https://nodes.sequence.app/mumbai",
    relay_url: "https://mumbai-relayer.sequence.app",
};

/// Arbitrum One.
pub const ARBITRUM: ChainConfig = ChainConfig {
    handle: "arbitrum",
    chain_id: 42161,
    rpc_url: "https://nodes.sequence.app/arbitrum",
    relay_url: "https://arbitrum-relayer.sequence.app",
};

/// Optimism.
pub const OPTIMISM: ChainConfig = ChainConfig {
    handle: "optimism",
    chain_id: 10,
    rpc_url: "https://nodes.sequence.app/optimism",
    relay_url: "https://optimism-relayer.sequence.app",
};

/// Chains supported by this deployment.
pub const SUPPORTED_CHAINS: &[ChainConfig] = &[MAINNET, POLYGON, MUMBAI, ARBITRUM, OPTIMISM];

/// Normalize a chain handle received at the boundary.
///
/// The registry itself is exact-match and case-sensitive; handlers pass
/// inbound values through this before resolving.
pub fn normalize_handle(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Registry of supported chains.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: &'static [ChainConfig],
}

impl ChainRegistry {
    /// Registry over the built-in chain table.
    pub fn builtin() -> Self {
        Self {
            chains: SUPPORTED_CHAINS,
        }
    }

    /// Resolve a handle to its chain configuration.
    ///
    /// Exact-string, case-sensitive match. Empty handles miss. No I/O.
    pub fn resolve(&self, handle: &str) -> Option<&ChainConfig> {
        if handle.is_empty() {
            return None;
        }
        self.chains.iter().find(|c| c.handle == handle)
    }

    /// All registered handles.
    pub fn handles(&self) -> Vec<&'static str> {
        self.chains.iter().map(|c| c.handle).collect()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
