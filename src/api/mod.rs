// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{MintResponse, MintSubmission, ProofSubmission, StatusResponse},
    state::AppState,
};

pub mod health;
pub mod mint;
pub mod status;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/status", get(status::relay_status))
        .route("/mint", post(mint::submit_mint))
        .with_state(state);

    Router::new()
        .route("/health", get(health::liveness))
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Permissive cross-origin headers on every response, the success
        // and rejection paths alike.
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(health::liveness, status::relay_status, mint::submit_mint),
    components(
        schemas(
            MintSubmission,
            ProofSubmission,
            MintResponse,
            StatusResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Process liveness"),
        (name = "Status", description = "Chain and signer status"),
        (name = "Mint", description = "Proof-gated mint submission")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::chain::ChainRegistry;
    use crate::config::{RelayConfig, DEFAULT_VERIFIER_URL};
    use crate::proof::{VerificationAuthority, VerifierError};
    use crate::relay::MintVariant;

    struct NoopVerifier;

    #[async_trait]
    impl VerificationAuthority for NoopVerifier {
        async fn is_valid_message_signature(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _message: &str,
            _signature: &str,
        ) -> Result<bool, VerifierError> {
            Ok(false)
        }

        async fn is_valid_eth_auth_proof(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _proof: &str,
        ) -> Result<bool, VerifierError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let config = RelayConfig {
            service_key: None,
            contract_address: None,
            chain_handle: None,
            project_access_key: None,
            verifier_url: DEFAULT_VERIFIER_URL.to_string(),
            mint_variant: MintVariant::Full,
        };
        let state = AppState::new(config, ChainRegistry::builtin(), Arc::new(NoopVerifier));
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
