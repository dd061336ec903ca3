// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only node client.
//!
//! Serves the status path's liveness probe against a chain's node RPC
//! endpoint. Transaction submission never goes through this client; that
//! is the relay session's job.

use alloy::{
    network::Ethereum,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::registry::ChainConfig;

/// HTTP provider type for read-only queries (with default fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Errors from read-only node access.
#[derive(Debug, thiserror::Error)]
pub enum NodeClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC error: {0}")]
    RpcError(String),
}

/// Read-only client bound to one chain's node endpoint.
pub struct NodeClient {
    chain: ChainConfig,
    provider: HttpProvider,
}

impl NodeClient {
    /// Create a client for the given chain.
    pub fn new(chain: &ChainConfig, access_key: Option<&str>) -> Result<Self, NodeClientError> {
        let url = super::endpoint_url(chain.rpc_url, access_key)
            .map_err(|e| NodeClientError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            chain: *chain,
            provider,
        })
    }

    /// Get the current block number.
    pub async fn get_block_number(&self) -> Result<u64, NodeClientError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| NodeClientError::RpcError(e.to_string()))
    }

    /// The chain this client reads from.
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::registry::POLYGON;

    #[test]
    fn client_binds_to_one_chain() {
        let client = NodeClient::new(&POLYGON, None).expect("builds");
        assert_eq!(client.chain().chain_id, 137);
    }

    #[test]
    fn client_accepts_access_key() {
        let client = NodeClient::new(&POLYGON, Some("pk_abc")).expect("builds");
        assert_eq!(client.chain().handle, "polygon");
    }
}
