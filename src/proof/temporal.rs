// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Temporal validity checks for verified proofs.
//!
//! A proof is valid for `issued_at <= now < expires_at` (inclusive lower
//! bound, exclusive upper bound). Timestamps are unix seconds. Missing or
//! unparsable timestamps never reach this guard: payload decoding fails
//! closed upstream.

/// Outcome of a temporal validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// `issued_at <= now < expires_at`
    Valid,
    /// `now >= expires_at`
    Expired,
    /// `now < issued_at`
    NotYetValid,
}

/// Check a proof's validity window against the current time.
pub fn check_validity(issued_at: i64, expires_at: i64, now: i64) -> Validity {
    if now < issued_at {
        Validity::NotYetValid
    } else if now >= expires_at {
        Validity::Expired
    } else {
        Validity::Valid
    }
}
