// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The proof-gated mint pipeline.
//!
//! Guard sequence for the mutating path:
//!
//! ```text
//! config validated -> chain resolved -> proof verified -> window valid
//!     -> claims extracted -> (session built, submitted by the handler)
//! ```
//!
//! Each guard failure short-circuits with one [`RelayError`]; no later
//! stage runs after a rejection. The proof payload stays untrusted until
//! the verification authority confirms the proof — claims are decoded and
//! the validity window checked strictly after that confirmation, and call
//! data is only encoded once every guard has passed.
//!
//! Collaborators are injected per invocation; the pipeline holds no state
//! of its own and nothing here is shared mutable state.

use std::str::FromStr;

use alloy::primitives::Address;

use crate::chain::{normalize_handle, ChainConfig, ChainRegistry};
use crate::config::{RelayConfig, CONTRACT_ADDRESS_ENV};
use crate::error::RelayError;
use crate::models::{MintRequest, MintSubmission, ProofSubmission};
use crate::proof::ethauth;
use crate::proof::{check_validity, Validity, VerificationAuthority};
use crate::relay::encode_mint;

/// A mint that has passed every guard and is ready to submit.
#[derive(Debug, Clone)]
pub struct PreparedMint {
    /// Resolved chain for session construction.
    pub chain: ChainConfig,
    /// Target mint contract.
    pub contract: Address,
    /// Normalized mint request.
    pub mint: MintRequest,
    /// Encoded call data for the configured mint variant.
    pub calldata: Vec<u8>,
}

/// Request-scoped pipeline over injected collaborators.
pub struct Pipeline<'a> {
    config: &'a RelayConfig,
    registry: &'a ChainRegistry,
    verifier: &'a dyn VerificationAuthority,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a RelayConfig,
        registry: &'a ChainRegistry,
        verifier: &'a dyn VerificationAuthority,
    ) -> Self {
        Self {
            config,
            registry,
            verifier,
        }
    }

    /// Run every guard up to claims extraction and call data encoding.
    ///
    /// `now` is unix seconds; threading it in keeps the temporal guard
    /// deterministic under test.
    pub async fn prepare(
        &self,
        submission: &MintSubmission,
        now: i64,
    ) -> Result<PreparedMint, RelayError> {
        // Config validated: reject before resolving anything or calling out.
        self.config.require_service_key()?;
        let contract_raw = self.config.require_contract_address()?;
        let contract = Address::from_str(contract_raw).map_err(|_| RelayError::InvalidSetting {
            name: CONTRACT_ADDRESS_ENV,
            reason: "not a well-formed EVM address".to_string(),
        })?;

        // Chain resolved.
        let handle = normalize_handle(self.config.chain_handle_for(submission.chain.as_deref())?);
        let chain = *self
            .registry
            .resolve(&handle)
            .ok_or_else(|| RelayError::UnsupportedChain(handle.clone()))?;

        // Proof verified, then (for ETHAuth) window checked and claims decoded.
        let claims = match &submission.proof {
            ProofSubmission::Message {
                address,
                message,
                signature,
            } => {
                let valid = self
                    .verifier
                    .is_valid_message_signature(chain.chain_id, address, message, signature)
                    .await
                    .map_err(|e| RelayError::VerifierUnavailable(e.to_string()))?;
                if !valid {
                    return Err(RelayError::InvalidProof);
                }
                // Message proofs carry no validity window and no claims.
                None
            }
            ProofSubmission::EthAuth { address, proof } => {
                let valid = self
                    .verifier
                    .is_valid_eth_auth_proof(chain.chain_id, address, proof)
                    .await
                    .map_err(|e| RelayError::VerifierUnavailable(e.to_string()))?;
                if !valid {
                    return Err(RelayError::InvalidProof);
                }

                // The payload is untrusted input until the line above.
                let decoded = ethauth::decode(proof)
                    .map_err(|e| RelayError::MalformedClaims(e.to_string()))?;
                if !decoded.address.eq_ignore_ascii_case(address) {
                    return Err(RelayError::InvalidProof);
                }

                match check_validity(decoded.payload.iat, decoded.payload.exp, now) {
                    Validity::Valid => {}
                    Validity::Expired => return Err(RelayError::ProofExpired),
                    Validity::NotYetValid => return Err(RelayError::ProofNotYetValid),
                }
                Some(decoded.payload)
            }
        };

        // Claims extracted.
        let mint = MintRequest::resolve(submission, claims.as_ref())?;
        let calldata = encode_mint(
            self.config.mint_variant,
            mint.recipient,
            mint.token_id,
            mint.amount,
        );

        Ok(PreparedMint {
            chain,
            contract,
            mint,
            calldata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use crate::config::DEFAULT_VERIFIER_URL;
    use crate::proof::VerifierError;
    use crate::relay::MintVariant;

    const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12";
    const CONTRACT: &str = "0x1aBc9771A6cD6E5195a132a4AA62E6bD6B6dAcbc";
    const SERVICE_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe51296170827936ea5cce4b76994b0f";

    const NOW: i64 = 1_700_000_030;
    const ISSUED: i64 = 1_700_000_000;
    const EXPIRES: i64 = ISSUED + 60;

    /// Substitute authority with a call counter.
    struct MockVerifier {
        verdict: Result<bool, ()>,
        calls: AtomicUsize,
    }

    impl MockVerifier {
        fn accepting() -> Self {
            Self {
                verdict: Ok(true),
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting() -> Self {
            Self {
                verdict: Ok(false),
                calls: AtomicUsize::new(0),
            }
        }

        fn unreachable_authority() -> Self {
            Self {
                verdict: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn answer(&self) -> Result<bool, VerifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
                .map_err(|_| VerifierError::Transport("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl VerificationAuthority for MockVerifier {
        async fn is_valid_message_signature(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _message: &str,
            _signature: &str,
        ) -> Result<bool, VerifierError> {
            self.answer()
        }

        async fn is_valid_eth_auth_proof(
            &self,
            _chain_id: u64,
            _wallet_address: &str,
            _proof: &str,
        ) -> Result<bool, VerifierError> {
            self.answer()
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

    fn ethauth_proof(iat: i64, exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"app":"mint-portal","iat":{iat},"exp":{exp},"v":"1","tokenId":5,"amount":1}}"#
        ));
        format!("eth.{WALLET}.{payload}.c2ln")
    }

    fn ethauth_submission(proof: String) -> MintSubmission {
        serde_json::from_str(&format!(
            r#"{{"proof":{{"type":"ethauth","address":"{WALLET}","proof":"{proof}"}}}}"#
        ))
        .unwrap()
    }

    fn message_submission() -> MintSubmission {
        serde_json::from_str(&format!(
            r#"{{"proof":{{"type":"message","address":"{WALLET}","message":"mint please","signature":"0xsig"}},"tokenId":5}}"#
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn valid_ethauth_proof_prepares_a_mint() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let prepared = pipeline
            .prepare(&ethauth_submission(ethauth_proof(ISSUED, EXPIRES)), NOW)
            .await
            .expect("prepares");

        assert_eq!(prepared.chain.chain_id, 137);
        assert_eq!(prepared.contract, Address::from_str(CONTRACT).unwrap());
        assert_eq!(prepared.mint.token_id, alloy::primitives::U256::from(5));
        assert_eq!(&prepared.calldata[..4], &[0x73, 0x11, 0x33, 0xe9]);
        assert_eq!(verifier.call_count(), 1);
    }

    #[tokio::test]
    async fn valid_message_proof_prepares_a_mint() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let prepared = pipeline
            .prepare(&message_submission(), NOW)
            .await
            .expect("prepares");

        assert!(!prepared.calldata.is_empty());
        assert_eq!(
            prepared.mint.recipient,
            Address::from_str(WALLET).unwrap(),
            "recipient defaults to the proven wallet"
        );
    }

    #[tokio::test]
    async fn missing_contract_rejects_before_chain_resolution() {
        let mut config = config();
        config.contract_address = None;
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        // The chain is also unsupported; the config guard must win.
        let mut submission = message_submission();
        submission.chain = Some("dogechain".to_string());

        let err = pipeline.prepare(&submission, NOW).await.unwrap_err();
        assert!(matches!(
            err,
            RelayError::MissingSetting("CONTRACT_ADDRESS")
        ));
        assert_eq!(verifier.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_service_key_rejects_first() {
        let mut config = config();
        config.service_key = None;
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline.prepare(&message_submission(), NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingSetting("SERVICE_KEY")));
        assert_eq!(verifier.call_count(), 0);
    }

    #[tokio::test]
    async fn unsupported_chain_rejects_without_calling_the_authority() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let mut submission = message_submission();
        submission.chain = Some("dogechain".to_string());

        let err = pipeline.prepare(&submission, NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedChain(h) if h == "dogechain"));
        assert_eq!(verifier.call_count(), 0);
    }

    #[tokio::test]
    async fn chain_handle_is_normalized_at_the_boundary() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let mut submission = message_submission();
        submission.chain = Some("  Polygon ".to_string());

        let prepared = pipeline.prepare(&submission, NOW).await.expect("prepares");
        assert_eq!(prepared.chain.handle, "polygon");
    }

    #[tokio::test]
    async fn rejected_proof_is_unauthorized_and_nothing_is_encoded() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::rejecting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline
            .prepare(&ethauth_submission(ethauth_proof(ISSUED, EXPIRES)), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidProof));
        assert_eq!(verifier.call_count(), 1);
    }

    #[tokio::test]
    async fn rejected_garbage_proof_never_reports_malformed_claims() {
        // Decode must not run before the authority's verdict: a rejected
        // proof is Unauthorized even when its payload is garbage.
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::rejecting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline
            .prepare(&ethauth_submission("eth.0xabc.!!!.c2ln".to_string()), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::InvalidProof));
    }

    #[tokio::test]
    async fn accepted_garbage_proof_is_malformed_claims() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline
            .prepare(&ethauth_submission("eth.0xabc.!!!.c2ln".to_string()), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::MalformedClaims(_)));
    }

    #[tokio::test]
    async fn proof_address_mismatch_is_unauthorized() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        // Proof string embeds WALLET but the submission claims CONTRACT.
        let submission: MintSubmission = serde_json::from_str(&format!(
            r#"{{"proof":{{"type":"ethauth","address":"{CONTRACT}","proof":"{}"}}}}"#,
            ethauth_proof(ISSUED, EXPIRES)
        ))
        .unwrap();

        let err = pipeline.prepare(&submission, NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::InvalidProof));
    }

    #[tokio::test]
    async fn expired_window_is_rejected() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline
            .prepare(
                &ethauth_submission(ethauth_proof(ISSUED, EXPIRES)),
                EXPIRES,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::ProofExpired));
    }

    #[tokio::test]
    async fn future_window_is_rejected() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::accepting();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline
            .prepare(
                &ethauth_submission(ethauth_proof(ISSUED, EXPIRES)),
                ISSUED - 1,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::ProofNotYetValid));
    }

    #[tokio::test]
    async fn authority_fault_is_not_a_proof_rejection() {
        let config = config();
        let registry = ChainRegistry::builtin();
        let verifier = MockVerifier::unreachable_authority();
        let pipeline = Pipeline::new(&config, &registry, &verifier);

        let err = pipeline.prepare(&message_submission(), NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::VerifierUnavailable(_)));
    }
}
