// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relay signing sessions.
//!
//! A session binds the service signing key to exactly one chain and routes
//! outbound transactions through that chain's relay endpoint — not the
//! node RPC. Sessions are built per request and dropped with it; they are
//! never cached or shared, so a per-request chain override can never leak
//! into another request.

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};

use crate::chain::ChainConfig;
use crate::config::SERVICE_KEY_ENV;
use crate::error::RelayError;

/// Wallet-filled HTTP provider targeting a relay endpoint.
pub(crate) type RelayProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Session construction failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unusable signing key: {0}")]
    InvalidKey(String),

    #[error("invalid relay endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<SessionError> for RelayError {
    fn from(err: SessionError) -> Self {
        match err {
            // The reason text carries parser output, never key material.
            SessionError::InvalidKey(reason) => RelayError::InvalidSetting {
                name: SERVICE_KEY_ENV,
                reason,
            },
            SessionError::InvalidEndpoint(reason) => RelayError::InvalidSetting {
                name: "relay endpoint",
                reason,
            },
        }
    }
}

/// Delegated signing session bound to one chain, submitting via relay.
pub struct RelaySession {
    chain: ChainConfig,
    signer_address: Address,
    provider: RelayProvider,
}

impl RelaySession {
    /// Build a session from the service key and a resolved chain config.
    ///
    /// Both the relay endpoint (session transport) and the node RPC
    /// endpoint come from `chain`; nothing here is per-call-site.
    pub fn build(
        service_key: &str,
        chain: &ChainConfig,
        access_key: Option<&str>,
    ) -> Result<Self, SessionError> {
        let signer = parse_service_key(service_key)?;
        let signer_address = signer.address();

        let relay_url = crate::chain::endpoint_url(chain.relay_url, access_key)
            .map_err(|e| SessionError::InvalidEndpoint(e.to_string()))?;

        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(relay_url);

        Ok(Self {
            chain: *chain,
            signer_address,
            provider,
        })
    }

    /// Address of the service signer.
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// The chain this session is bound to.
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    pub(crate) fn provider(&self) -> &RelayProvider {
        &self.provider
    }
}

/// Parse a hex service key (with or without `0x` prefix) into a signer.
pub fn parse_service_key(service_key: &str) -> Result<PrivateKeySigner, SessionError> {
    let hex_key = service_key.trim().trim_start_matches("0x");

    let key_bytes =
        alloy::hex::decode(hex_key).map_err(|e| SessionError::InvalidKey(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes).map_err(|e| SessionError::InvalidKey(e.to_string()))
}
