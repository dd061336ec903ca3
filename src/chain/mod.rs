// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain registry and read-only node access.

pub mod client;
pub mod registry;

pub use client::{NodeClient, NodeClientError};
pub use registry::{normalize_handle, ChainConfig, ChainRegistry};

use url::Url;

/// Build an endpoint URL, appending the gateway access key as a trailing
/// path segment when one is configured (hosted node/relay URL shape).
pub(crate) fn endpoint_url(base: &str, access_key: Option<&str>) -> Result<Url, url::ParseError> {
    let mut url: Url = base.parse()?;
    if let Some(key) = access_key.filter(|k| !k.is_empty()) {
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(key);
    }
    Ok(url)
}
