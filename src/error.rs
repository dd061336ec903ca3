// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error types for the relay pipeline and the HTTP boundary.
//!
//! [`RelayError`] is the classified rejection taxonomy: every guard in the
//! pipeline fails with exactly one variant, each carrying a stable
//! `error_code` and a fixed HTTP status. Classified rejections are part of
//! the normal contract; unclassified faults (verifier transport errors,
//! relay failures) keep their raw text in a separate `detail` field so the
//! reason code is never replaced by internal exception text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Classified reason for a failed relay submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayFailureReason {
    /// The service signer cannot cover gas or value
    InsufficientFunds,
    /// The contract call reverted
    Reverted,
    /// The relay endpoint was unreachable or timed out
    Network,
    /// The relay rejected the submission for any other reason
    Rejected,
}

impl RelayFailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayFailureReason::InsufficientFunds => "insufficient_funds",
            RelayFailureReason::Reverted => "reverted",
            RelayFailureReason::Network => "network",
            RelayFailureReason::Rejected => "rejected",
        }
    }
}

/// Rejection and failure taxonomy for the proof-gated relay pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A required configuration setting is missing or empty.
    /// The message names the setting, never its value.
    #[error("Missing required setting `{0}`")]
    MissingSetting(&'static str),

    /// A configuration setting is present but unusable.
    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: String,
    },

    /// The requested chain handle is not in the registry.
    #[error("Unsupported chain `{0}`")]
    UnsupportedChain(String),

    /// The verification authority reported the proof as not valid.
    #[error("Unauthorized")]
    InvalidProof,

    /// The proof's expiry timestamp is in the past.
    #[error("Proof has expired")]
    ProofExpired,

    /// The proof's issued-at timestamp is in the future.
    #[error("Proof is not yet valid")]
    ProofNotYetValid,

    /// The verified proof payload could not be decoded into usable claims.
    #[error("Malformed proof claims: {0}")]
    MalformedClaims(String),

    /// An address field in the request is not a well-formed EVM address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The verification authority itself failed (transport or malformed
    /// response), as opposed to reporting the proof invalid.
    #[error("Proof verification service unavailable")]
    VerifierUnavailable(String),

    /// The relay rejected or failed the submission.
    #[error("Relay submission failed: {}", reason.as_str())]
    Relay {
        reason: RelayFailureReason,
        detail: String,
    },
}

impl RelayError {
    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            RelayError::MissingSetting(_) => "missing_setting",
            RelayError::InvalidSetting { .. } => "invalid_setting",
            RelayError::UnsupportedChain(_) => "unsupported_chain",
            RelayError::InvalidProof => "invalid_proof",
            RelayError::ProofExpired => "proof_expired",
            RelayError::ProofNotYetValid => "proof_not_yet_valid",
            RelayError::MalformedClaims(_) => "malformed_claims",
            RelayError::InvalidAddress(_) => "invalid_address",
            RelayError::VerifierUnavailable(_) => "verifier_unavailable",
            RelayError::Relay { .. } => "relay_failed",
        }
    }

    /// HTTP status for this error. Only proof rejection by the authority
    /// maps to 401; every other rejection is a 400.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::InvalidProof => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Operator-facing detail, kept separate from the reason code.
    fn detail(&self) -> Option<String> {
        match self {
            RelayError::Relay { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }
}

/// HTTP error envelope returned by every handler.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<&'static str>,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            detail: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        // Transport faults are logged with their raw text but surfaced
        // generically; the classified taxonomy is the outward contract.
        if let RelayError::VerifierUnavailable(detail) = &err {
            tracing::warn!(detail = %detail, "verification authority unreachable");
        }
        Self {
            status: err.status_code(),
            message: err.to_string(),
            code: Some(err.error_code()),
            detail: err.detail(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
