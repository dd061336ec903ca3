// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared application state.
//!
//! Everything here is read-only after startup: configuration, the chain
//! registry, and the verification authority client. Request-scoped state
//! (sessions, prepared mints) never lives here — collaborators are handed
//! to each pipeline invocation instead of being process-wide singletons.

use std::sync::Arc;

use crate::chain::ChainRegistry;
use crate::config::RelayConfig;
use crate::proof::VerificationAuthority;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub registry: Arc<ChainRegistry>,
    pub verifier: Arc<dyn VerificationAuthority>,
}

impl AppState {
    pub fn new(
        config: RelayConfig,
        registry: ChainRegistry,
        verifier: Arc<dyn VerificationAuthority>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            verifier,
        }
    }
}
