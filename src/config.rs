// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup into a
//! [`RelayConfig`]. Values required by a given request path are re-checked
//! per request (the pipeline's config-validation stage), so a missing
//! setting rejects that request with a 400 naming the setting — before any
//! chain resolution or external call.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SERVICE_KEY` | Hex-encoded service signing key (never logged) | Required for status/mint paths |
//! | `CONTRACT_ADDRESS` | Target mint contract address | Required for the mint path |
//! | `CHAIN_HANDLE` | Default chain handle (see registry) | Required unless every request names one |
//! | `PROJECT_ACCESS_KEY` | Relay/API gateway credential | Optional |
//! | `VERIFIER_URL` | Verification authority base URL | `https://api.sequence.app` |
//! | `MINT_VARIANT` | Mint ABI shape: `bare`, `recipient`, `full` | `full` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;

use crate::error::RelayError;
use crate::relay::calldata::MintVariant;

/// Environment variable name for the hex-encoded service signing key.
pub const SERVICE_KEY_ENV: &str = "SERVICE_KEY";

/// Environment variable name for the target mint contract address.
pub const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";

/// Environment variable name for the default chain handle.
pub const CHAIN_HANDLE_ENV: &str = "CHAIN_HANDLE";

/// Environment variable name for the relay/API gateway access key.
pub const PROJECT_ACCESS_KEY_ENV: &str = "PROJECT_ACCESS_KEY";

/// Environment variable name for the verification authority base URL.
pub const VERIFIER_URL_ENV: &str = "VERIFIER_URL";

/// Environment variable name for the mint ABI variant.
pub const MINT_VARIANT_ENV: &str = "MINT_VARIANT";

/// Default verification authority endpoint.
pub const DEFAULT_VERIFIER_URL: &str = "https://api.sequence.app";

/// Service configuration, loaded once at startup.
///
/// Required values are stored as `Option` and enforced per request path by
/// the `require_*` accessors, which fail with the setting's name. An empty
/// environment value is treated as missing.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Hex service signing key. Never logged, never echoed in errors.
    pub service_key: Option<String>,
    /// Target mint contract address.
    pub contract_address: Option<String>,
    /// Default chain handle; requests may override.
    pub chain_handle: Option<String>,
    /// Gateway credential for hosted node/relay endpoints.
    pub project_access_key: Option<String>,
    /// Verification authority base URL.
    pub verifier_url: String,
    /// ABI shape for the mint call.
    pub mint_variant: MintVariant,
}

fn non_empty(var: &str) -> Option<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

impl RelayConfig {
    /// Load configuration from the environment.
    ///
    /// Missing required values do not fail here (they reject the requests
    /// that need them); an unparseable `MINT_VARIANT` does.
    pub fn from_env() -> Result<Self, RelayError> {
        let mint_variant = match non_empty(MINT_VARIANT_ENV) {
            Some(raw) => MintVariant::parse(&raw).ok_or(RelayError::InvalidSetting {
                name: MINT_VARIANT_ENV,
                reason: format!("expected one of `bare`, `recipient`, `full`, got `{raw}`"),
            })?,
            None => MintVariant::Full,
        };

        Ok(Self {
            service_key: non_empty(SERVICE_KEY_ENV),
            contract_address: non_empty(CONTRACT_ADDRESS_ENV),
            chain_handle: non_empty(CHAIN_HANDLE_ENV),
            project_access_key: non_empty(PROJECT_ACCESS_KEY_ENV),
            verifier_url: non_empty(VERIFIER_URL_ENV)
                .unwrap_or_else(|| DEFAULT_VERIFIER_URL.to_string()),
            mint_variant,
        })
    }

    /// The service signing key, or a rejection naming the setting.
    pub fn require_service_key(&self) -> Result<&str, RelayError> {
        self.service_key
            .as_deref()
            .ok_or(RelayError::MissingSetting(SERVICE_KEY_ENV))
    }

    /// The mint contract address, or a rejection naming the setting.
    pub fn require_contract_address(&self) -> Result<&str, RelayError> {
        self.contract_address
            .as_deref()
            .ok_or(RelayError::MissingSetting(CONTRACT_ADDRESS_ENV))
    }

    /// The chain handle for a request: the explicit request value if given,
    /// otherwise the configured default.
    pub fn chain_handle_for<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, RelayError> {
        requested
            .filter(|h| !h.trim().is_empty())
            .or(self.chain_handle.as_deref())
            .ok_or(RelayError::MissingSetting(CHAIN_HANDLE_ENV))
    }
}
