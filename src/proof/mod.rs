// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proof verification: the external authority seam, ETHAuth proof
//! decoding, and temporal validity checks.
//!
//! The order of operations is fixed: verify the proof with the authority,
//! then decode the embedded payload, then check its validity window, and
//! only then trust its claims. The pipeline enforces this sequencing.

pub mod ethauth;
pub mod temporal;
pub mod verifier;

pub use temporal::{check_validity, Validity};
pub use verifier::{HttpVerifier, VerificationAuthority, VerifierError};
