// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relayed transaction submission: session construction, mint call data
//! encoding, and single-attempt dispatch.

pub mod calldata;
pub mod dispatch;
pub mod session;

pub use calldata::{encode_mint, MintVariant};
pub use dispatch::{submit, TransactionOutcome};
pub use session::{parse_service_key, RelaySession, SessionError};
