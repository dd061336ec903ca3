// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ETHAuth proof string decoding.
//!
//! An ETHAuth proof is a self-contained string of the form
//! `eth.<address>.<base64url(payload JSON)>.<base64url(signature)>`.
//! The payload carries the validity window (`iat`, `exp`, unix seconds)
//! plus optional application claims (`tokenId`, `amount`).
//!
//! Decoding here is purely structural. The payload is untrusted input
//! until the verification authority has confirmed the outer proof; the
//! pipeline only calls [`decode`] after that confirmation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

/// Leading tag of every ETHAuth proof string.
pub const ETHAUTH_PREFIX: &str = "eth";

/// Claims embedded in an ETHAuth proof payload.
///
/// `iat`/`exp` are required; decoding fails closed when either is absent
/// or not an integer. Application claims are optional non-negative
/// integers; a negative or fractional value fails the whole decode rather
/// than defaulting.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// Application name the proof was issued for.
    #[serde(default)]
    pub app: Option<String>,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expires-at, unix seconds.
    pub exp: i64,
    /// Payload schema version.
    #[serde(default)]
    pub v: Option<String>,
    /// Token id claim.
    #[serde(default, rename = "tokenId")]
    pub token_id: Option<u64>,
    /// Amount claim.
    #[serde(default)]
    pub amount: Option<u64>,
}

/// A structurally decoded ETHAuth proof.
#[derive(Debug, Clone)]
pub struct DecodedProof {
    /// Wallet address embedded in the proof string.
    pub address: String,
    /// Decoded payload claims.
    pub payload: AuthPayload,
}

/// Structural decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum EthAuthError {
    #[error("expected `eth.<address>.<payload>.<signature>`, got {0} segments")]
    WrongSegmentCount(usize),

    #[error("proof prefix must be `eth`")]
    WrongPrefix,

    #[error("payload is not valid base64url: {0}")]
    BadEncoding(String),

    #[error("payload is not a valid claims object: {0}")]
    BadPayload(String),
}

/// Decode an ETHAuth proof string into its embedded address and claims.
///
/// Call only after the verification authority has confirmed the proof.
pub fn decode(proof: &str) -> Result<DecodedProof, EthAuthError> {
    let segments: Vec<&str> = proof.split('.').collect();
    if segments.len() != 4 {
        return Err(EthAuthError::WrongSegmentCount(segments.len()));
    }
    if segments[0] != ETHAUTH_PREFIX {
        return Err(EthAuthError::WrongPrefix);
    }

    let raw = URL_SAFE_NO_PAD
        .decode(segments[2])
        .map_err(|e| EthAuthError::BadEncoding(e.to_string()))?;

    let payload: AuthPayload =
        serde_json::from_slice(&raw).map_err(|e| EthAuthError::BadPayload(e.to_string()))?;

    Ok(DecodedProof {
        address: segments[1].to_string(),
        payload,
    })
}
