// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Mutating mint path.
//!
//! Runs the proof-gated pipeline, then builds a request-scoped relay
//! session and submits the encoded call. The session exists only inside
//! this handler invocation; nothing about it is cached.

use axum::{extract::State, Json};

use crate::{
    error::{ApiError, RelayError},
    models::{MintResponse, MintSubmission},
    pipeline::Pipeline,
    relay::{self, RelaySession, TransactionOutcome},
    state::AppState,
};

/// Verify a proof and submit the mint through the chain's relay.
#[utoipa::path(
    post,
    path = "/v1/mint",
    tag = "Mint",
    request_body = MintSubmission,
    responses(
        (status = 200, description = "Transaction submitted via relay", body = MintResponse),
        (status = 400, description = "Configuration, chain, claim, or relay rejection"),
        (status = 401, description = "Proof rejected by the verification authority")
    )
)]
pub async fn submit_mint(
    State(state): State<AppState>,
    Json(submission): Json<MintSubmission>,
) -> Result<Json<MintResponse>, ApiError> {
    let now = chrono::Utc::now().timestamp();

    let pipeline = Pipeline::new(&state.config, &state.registry, state.verifier.as_ref());
    let prepared = pipeline.prepare(&submission, now).await?;

    // Guards have all passed; the session is built for exactly this
    // request and this chain.
    let service_key = state.config.require_service_key()?;
    let session = RelaySession::build(
        service_key,
        &prepared.chain,
        state.config.project_access_key.as_deref(),
    )
    .map_err(RelayError::from)?;

    match relay::submit(&session, prepared.contract, prepared.calldata).await {
        TransactionOutcome::Submitted { tx_hash } => Ok(Json(MintResponse {
            tx_hash,
            chain: prepared.chain.handle.to_string(),
            chain_id: prepared.chain.chain_id,
            status: "submitted".to_string(),
        })),
        TransactionOutcome::Failed { reason, detail } => {
            Err(RelayError::Relay { reason, detail }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use crate::chain::ChainRegistry;
    use crate::config::{RelayConfig, DEFAULT_VERIFIER_URL};
    use crate::proof::{VerificationAuthority, VerifierError};
    use crate::relay::MintVariant;

    const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12";
    const CONTRACT: &str = "0x1aBc9771A6cD6E5195a132a4AA62E6bD6B6dAcbc";
    const SERVICE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe51296170827936ea5cce4b76994b0f";

    struct FixedVerifier(bool);

    #[async_trait]
    impl VerificationAuthority for FixedVerifier {
        async fn is_valid_message_signature(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _message: &str,
            _signature: &str,
        ) -> Result<bool, VerifierError> {
            Ok(self.0)
        }

        async fn is_valid_eth_auth_proof(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _proof: &str,
        ) -> Result<bool, VerifierError> {
            Ok(self.0)
        }
    }

    fn config() -> RelayConfig {
        RelayConfig {
            service_key: Some(SERVICE_KEY.to_string()),
            contract_address: Some(CONTRACT.to_string()),
            chain_handle: Some("polygon".to_string()),
            project_access_key: None,
            verifier_url: DEFAULT_VERIFIER_URL.to_string(),
            mint_variant: MintVariant::Full,
        }
    }

    fn state_with(config: RelayConfig, verdict: bool) -> AppState {
        AppState::new(
            config,
            ChainRegistry::builtin(),
            Arc::new(FixedVerifier(verdict)),
        )
    }

    fn message_submission() -> MintSubmission {
        serde_json::from_str(&format!(
            r#"{{"proof":{{"type":"message","address":"{WALLET}","message":"mint please","signature":"0xsig"}},"tokenId":5,"amount":1}}"#
        ))
        .unwrap()
    }

    fn expired_ethauth_submission() -> MintSubmission {
        // Window far in the past relative to any wall clock.
        let payload = URL_SAFE_NO_PAD
            .encode(r#"{"app":"mint-portal","iat":1000000000,"exp":1000000600,"v":"1","tokenId":5}"#);
        serde_json::from_str(&format!(
            r#"{{"proof":{{"type":"ethauth","address":"{WALLET}","proof":"eth.{WALLET}.{payload}.c2ln"}}}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn invalid_signature_is_unauthorized() {
        let state = state_with(config(), false);

        let err = submit_mint(State(state), Json(message_submission()))
            .await
            .err()
            .expect("rejects");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Unauthorized");
    }

    #[tokio::test]
    async fn expired_proof_is_a_bad_request() {
        let state = state_with(config(), true);

        let err = submit_mint(State(state), Json(expired_ethauth_submission()))
            .await
            .err()
            .expect("rejects");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Proof has expired");
    }

    #[tokio::test]
    async fn missing_contract_setting_is_named() {
        let mut config = config();
        config.contract_address = None;
        let state = state_with(config, true);

        let err = submit_mint(State(state), Json(message_submission()))
            .await
            .err()
            .expect("rejects");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "Missing required setting `CONTRACT_ADDRESS`"
        );
    }
}
