// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only status path.
//!
//! Resolves a chain, derives the service signer address, and probes the
//! node for the current block number. No state is mutated and nothing is
//! submitted.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    chain::{normalize_handle, NodeClient},
    error::{ApiError, RelayError},
    models::StatusResponse,
    relay::parse_service_key,
    state::AppState,
};

/// Query parameters for the status path.
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusQuery {
    /// Chain handle; defaults to the configured chain.
    pub chain: Option<String>,
}

/// Report the service signer and current block number for a chain.
#[utoipa::path(
    get,
    path = "/v1/status",
    tag = "Status",
    params(StatusQuery),
    responses(
        (status = 200, description = "Relay status for the chain", body = StatusResponse),
        (status = 400, description = "Missing configuration or unsupported chain")
    )
)]
pub async fn relay_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let config = &state.config;

    let service_key = config.require_service_key()?;
    let handle = normalize_handle(config.chain_handle_for(query.chain.as_deref())?);
    let chain = state
        .registry
        .resolve(&handle)
        .ok_or_else(|| RelayError::UnsupportedChain(handle.clone()))?;

    let signer = parse_service_key(service_key).map_err(RelayError::from)?;

    // The probe is best-effort: the signer address alone answers liveness.
    let block_number = match NodeClient::new(chain, config.project_access_key.as_deref()) {
        Ok(client) => match client.get_block_number().await {
            Ok(number) => Some(number),
            Err(e) => {
                tracing::warn!(chain = chain.handle, error = %e, "block number probe failed");
                None
            }
        },
        Err(e) => {
            tracing::warn!(chain = chain.handle, error = %e, "node client construction failed");
            None
        }
    };

    Ok(Json(StatusResponse {
        chain: chain.handle.to_string(),
        chain_id: chain.chain_id,
        signer_address: signer.address().to_string(),
        block_number,
    }))
}
