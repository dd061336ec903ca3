// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proofgate - Proof-Gated Mint Relay Service
//!
//! This crate verifies client-submitted authentication proofs (a signed
//! message or a self-contained ETHAuth proof) against an external
//! verification authority and, only for valid and unexpired proofs,
//! submits a mint contract call from a service-held signing key through
//! the chain's relay endpoint.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `chain` - Chain registry and read-only node access
//! - `proof` - Proof verification, ETHAuth decoding, temporal checks
//! - `relay` - Relay sessions, mint call data, transaction dispatch
//! - `pipeline` - The proof-gated guard sequence

pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod proof;
pub mod relay;
pub mod state;
