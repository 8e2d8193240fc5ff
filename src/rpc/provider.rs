// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only provider setup.

use alloy::{
    providers::{Provider, ProviderBuilder},
    transports::http::reqwest::Url,
};
use anyhow::{anyhow, Result};
use tracing::info;

/// Create an HTTP provider for `rpc_url`.
///
/// No wallet is attached: everything this crate does is `eth_call`.
pub fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone> {
    let url: Url = rpc_url
        .parse()
        .map_err(|e| anyhow!("Invalid RPC URL {}: {}", rpc_url, e))?;

    info!("📡 RPC: {}", url);
    Ok(ProviderBuilder::new().connect_http(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_urls() {
        assert!(create_provider("not a url").is_err());
        assert!(create_provider("https://bsc-dataseed1.binance.org").is_ok());
    }
}
