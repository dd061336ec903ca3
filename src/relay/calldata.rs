// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mint call data encoding.
//!
//! Deployments expose one of three mint ABI shapes; which one is selected
//! by configuration, never by inspecting the target contract at runtime.
//! Inputs are validated by the pipeline before they reach this module —
//! encoding is deterministic and infallible.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

mod abi {
    pub(super) mod bare {
        alloy::sol! {
            function mint();
        }
    }

    pub(super) mod recipient {
        alloy::sol! {
            function mint(address to);
        }
    }

    pub(super) mod full {
        alloy::sol! {
            function mint(address to, uint256 tokenId, uint256 amount, bytes data);
        }
    }
}

/// ABI shape of the deployed mint entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MintVariant {
    /// `mint()`
    Bare,
    /// `mint(address)`
    Recipient,
    /// `mint(address,uint256,uint256,bytes)` with empty trailing data
    Full,
}

impl MintVariant {
    /// Parse a configuration value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bare" => Some(MintVariant::Bare),
            "recipient" => Some(MintVariant::Recipient),
            "full" => Some(MintVariant::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MintVariant::Bare => "bare",
            MintVariant::Recipient => "recipient",
            MintVariant::Full => "full",
        }
    }
}

/// Encode the mint call for the configured ABI shape.
///
/// Arguments the variant does not take are ignored; the `Full` variant's
/// trailing `bytes` field is always empty.
pub fn encode_mint(
    variant: MintVariant,
    recipient: Address,
    token_id: U256,
    amount: U256,
) -> Vec<u8> {
    match variant {
        MintVariant::Bare => abi::bare::mintCall {}.abi_encode(),
        MintVariant::Recipient => abi::recipient::mintCall { to: recipient }.abi_encode(),
        MintVariant::Full => abi::full::mintCall {
            to: recipient,
            tokenId: token_id,
            amount,
            data: Bytes::new(),
        }
        .abi_encode(),
    }
}
