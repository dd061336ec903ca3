// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the relay API. All boundary types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! The proof schema is explicitly tagged: a submission is either a
//! `message` proof (message + signature) or an `ethauth` proof
//! (self-contained proof string). Unknown tags and unknown top-level
//! fields are rejected at deserialization rather than ignored.

use std::str::FromStr;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RelayError;
use crate::proof::ethauth::AuthPayload;

// =============================================================================
// Request Types
// =============================================================================

/// A wallet-bound authentication proof, in one of two shapes.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProofSubmission {
    /// A plain message signed by the wallet.
    Message {
        /// Wallet address the signature is claimed for.
        address: String,
        /// The signed message text.
        message: String,
        /// The signature over the message.
        signature: String,
    },
    /// A self-contained ETHAuth proof string.
    EthAuth {
        /// Wallet address the proof is claimed for.
        address: String,
        /// Proof string (`eth.<address>.<payload>.<signature>`).
        proof: String,
    },
}

impl ProofSubmission {
    /// The wallet address the proof claims to bind.
    pub fn wallet_address(&self) -> &str {
        match self {
            ProofSubmission::Message { address, .. } => address,
            ProofSubmission::EthAuth { address, .. } => address,
        }
    }
}

/// Body of the mint path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MintSubmission {
    /// Chain handle; defaults to the configured chain.
    #[serde(default)]
    pub chain: Option<String>,
    /// The authentication proof gating this mint.
    pub proof: ProofSubmission,
    /// Mint recipient; defaults to the proven wallet address.
    #[serde(default)]
    pub recipient: Option<String>,
    /// Token id; falls back to the proof's `tokenId` claim.
    #[serde(default, rename = "tokenId")]
    pub token_id: Option<u64>,
    /// Amount; falls back to the proof's `amount` claim, then to 1.
    #[serde(default)]
    pub amount: Option<u64>,
}

// =============================================================================
// Normalized Mint Request
// =============================================================================

/// A fully validated mint, ready for encoding.
///
/// Both code paths — explicit payload fields and decoded proof claims —
/// normalize into this one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub recipient: Address,
    pub token_id: U256,
    pub amount: U256,
}

impl MintRequest {
    /// Normalize a mint from explicit fields and (for ETHAuth proofs)
    /// verified payload claims. Explicit fields win over claims; `amount`
    /// defaults to 1; a missing token id fails closed.
    pub fn resolve(
        submission: &MintSubmission,
        claims: Option<&AuthPayload>,
    ) -> Result<Self, RelayError> {
        let recipient_raw = submission
            .recipient
            .as_deref()
            .unwrap_or_else(|| submission.proof.wallet_address());

        let recipient = Address::from_str(recipient_raw.trim())
            .map_err(|_| RelayError::InvalidAddress(recipient_raw.to_string()))?;

        let token_id = submission
            .token_id
            .or_else(|| claims.and_then(|c| c.token_id))
            .ok_or_else(|| {
                RelayError::MalformedClaims(
                    "tokenId missing from both payload and proof claims".to_string(),
                )
            })?;

        let amount = submission
            .amount
            .or_else(|| claims.and_then(|c| c.amount))
            .unwrap_or(1);

        Ok(Self {
            recipient,
            token_id: U256::from(token_id),
            amount: U256::from(amount),
        })
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Successful mint submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MintResponse {
    /// Transaction hash reported by the relay.
    pub tx_hash: String,
    /// Chain the transaction was submitted on.
    pub chain: String,
    /// Numeric chain id.
    pub chain_id: u64,
    /// Submission status (always "submitted"; confirmation is not polled).
    pub status: String,
}

/// Status path response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Resolved chain handle.
    pub chain: String,
    /// Numeric chain id.
    pub chain_id: u64,
    /// Address of the service signer.
    pub signer_address: String,
    /// Current block number, omitted if the node probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}
