// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proof verification against the external verification authority.
//!
//! The authority is the only component that checks proof cryptography;
//! this service never validates signatures itself. The trait seam exists
//! so the pipeline can be exercised with a substitute authority in tests.
//!
//! A `false` return means the authority examined the proof and rejected
//! it. An `Err` means the authority could not be consulted (transport
//! fault, non-success status, malformed response) — callers must keep the
//! two apart: one is a 401, the other is not.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Verification call failures (not proof rejections).
#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("authority returned HTTP {0}")]
    BadStatus(u16),

    #[error("malformed authority response: {0}")]
    MalformedResponse(String),
}

/// External authority that checks proofs for this service.
#[async_trait]
pub trait VerificationAuthority: Send + Sync {
    /// Is `signature` a valid signature by `wallet_address` over `message`
    /// on the given chain?
    async fn is_valid_message_signature(
        &self,
        chain_id: u64,
        wallet_address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, VerifierError>;

    /// Is `proof` a valid ETHAuth proof for `wallet_address` on the given
    /// chain?
    async fn is_valid_eth_auth_proof(
        &self,
        chain_id: u64,
        wallet_address: &str,
        proof: &str,
    ) -> Result<bool, VerifierError>;
}

/// Request timeout for authority calls.
const VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageSignatureRequest<'a> {
    chain_id: String,
    wallet_address: &'a str,
    message: &'a str,
    signature: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EthAuthProofRequest<'a> {
    chain_id: String,
    wallet_address: &'a str,
    #[serde(rename = "ethAuthProofString")]
    proof_string: &'a str,
}

#[derive(Deserialize)]
struct IsValidResponse {
    #[serde(rename = "isValid")]
    is_valid: bool,
}

/// HTTP client for the hosted verification authority.
#[derive(Clone)]
pub struct HttpVerifier {
    base_url: String,
    access_key: Option<String>,
    client: reqwest::Client,
}

impl HttpVerifier {
    /// Create a verifier against the authority at `base_url`.
    pub fn new(base_url: impl Into<String>, access_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_key,
            client: reqwest::Client::builder()
                .timeout(VERIFY_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn call<T: Serialize>(&self, method: &str, body: &T) -> Result<bool, VerifierError> {
        let url = format!("{}/rpc/API/{method}", self.base_url.trim_end_matches('/'));

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.access_key {
            request = request.header("X-Access-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VerifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VerifierError::BadStatus(response.status().as_u16()));
        }

        let parsed: IsValidResponse = response
            .json()
            .await
            .map_err(|e| VerifierError::MalformedResponse(e.to_string()))?;

        Ok(parsed.is_valid)
    }
}

#[async_trait]
impl VerificationAuthority for HttpVerifier {
    async fn is_valid_message_signature(
        &self,
        chain_id: u64,
        wallet_address: &str,
        message: &str,
        signature: &str,
    ) -> Result<bool, VerifierError> {
        self.call(
            "IsValidMessageSignature",
            &MessageSignatureRequest {
                chain_id: chain_id.to_string(),
                wallet_address,
                message,
                signature,
            },
        )
        .await
    }

    async fn is_valid_eth_auth_proof(
        &self,
        chain_id: u64,
        wallet_address: &str,
        proof: &str,
    ) -> Result<bool, VerifierError> {
        self.call(
            "IsValidETHAuthProof",
            &EthAuthProofRequest {
                chain_id: chain_id.to_string(),
                wallet_address,
                proof_string: proof,
            },
        )
        .await
    }
}
