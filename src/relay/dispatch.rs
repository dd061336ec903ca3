// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction submission through a relay session.
//!
//! One submission attempt per call, no retry: submission is not
//! idempotent, and retry policy belongs to the caller. Failures are
//! classified into a stable reason code; the raw relay text rides along
//! as detail for operators.

use alloy::{
    primitives::Address,
    providers::Provider,
    rpc::types::TransactionRequest,
};

use super::session::RelaySession;
use crate::error::RelayFailureReason;

/// Result of a single relayed submission attempt.
#[derive(Debug, Clone)]
pub enum TransactionOutcome {
    /// The relay accepted the transaction.
    Submitted {
        /// Transaction hash reported by the relay
        tx_hash: String,
    },
    /// The relay rejected or failed the submission.
    Failed {
        reason: RelayFailureReason,
        detail: String,
    },
}

/// Submit a contract call through the session's relay endpoint.
pub async fn submit(session: &RelaySession, to: Address, data: Vec<u8>) -> TransactionOutcome {
    let tx = TransactionRequest::default().to(to).input(data.into());

    match session.provider().send_transaction(tx).await {
        Ok(pending) => {
            let tx_hash = format!("{:?}", pending.tx_hash());
            tracing::info!(
                chain = session.chain().handle,
                tx_hash = %tx_hash,
                "transaction submitted via relay"
            );
            TransactionOutcome::Submitted { tx_hash }
        }
        Err(e) => {
            let detail = e.to_string();
            let reason = classify_failure(&detail);
            tracing::warn!(
                chain = session.chain().handle,
                reason = reason.as_str(),
                detail = %detail,
                "relay submission failed"
            );
            TransactionOutcome::Failed { reason, detail }
        }
    }
}

/// Classify relay failure text into a stable reason code.
fn classify_failure(detail: &str) -> RelayFailureReason {
    let lower = detail.to_ascii_lowercase();
    if lower.contains("insufficient funds") {
        RelayFailureReason::InsufficientFunds
    } else if lower.contains("revert") || lower.contains("execution failed") {
        RelayFailureReason::Reverted
    } else if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connect")
        || lower.contains("dns")
    {
        RelayFailureReason::Network
    } else {
        RelayFailureReason::Rejected
    }
}
