// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration module - loads settings from environment variables.

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;

use crate::multicall::DEFAULT_MAX_CALLS_PER_TX;
use crate::networks::{network_config, NetworkConfig};

/// Runtime configuration for the read tooling.
#[derive(Debug, Clone)]
pub struct Config {
    // Network
    pub network: String,
    pub rpc_url: Option<String>,

    // Pair sync
    pub pairs_file: PathBuf,
    pub factory_abi: Option<PathBuf>,

    // Multicall
    pub max_calls_per_tx: usize,
}

impl Config {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Network
            network: env_var_or("NETWORK", "bsc"),
            rpc_url: std::env::var("RPC_URL").ok(),

            // Pair sync
            pairs_file: PathBuf::from(env_var_or("PAIRS_FILE", "constants/bsc/ApePairAddresses")),
            factory_abi: std::env::var("FACTORY_ABI").ok().map(PathBuf::from),

            // Multicall
            max_calls_per_tx: parse_max_calls(&env_var_or(
                "MAX_CALLS_PER_TX",
                &DEFAULT_MAX_CALLS_PER_TX.to_string(),
            ))?,
        })
    }

    /// Preset addresses for the configured network.
    pub fn network_config(&self) -> Result<NetworkConfig> {
        network_config(&self.network)
    }

    /// Explicit RPC URL, falling back to the network's public endpoint.
    pub fn resolve_rpc_url(&self, network: &NetworkConfig) -> Result<String> {
        self.rpc_url
            .clone()
            .or_else(|| network.rpc_url.map(str::to_string))
            .ok_or_else(|| anyhow!("RPC_URL not set and network {} has no default", network.name))
    }
}

fn env_var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse a chunk size, rejecting zero.
pub fn parse_max_calls(s: &str) -> Result<usize> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|e| anyhow!("Invalid MAX_CALLS_PER_TX {}: {}", s, e))?;
    if value == 0 {
        bail!("MAX_CALLS_PER_TX must be at least 1");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rpc_url: Option<&str>) -> Config {
        Config {
            network: "bsc".to_string(),
            rpc_url: rpc_url.map(str::to_string),
            pairs_file: PathBuf::from("pairs"),
            factory_abi: None,
            max_calls_per_tx: DEFAULT_MAX_CALLS_PER_TX,
        }
    }

    #[test]
    fn max_calls_must_be_positive() {
        assert_eq!(parse_max_calls("250").unwrap(), 250);
        assert_eq!(parse_max_calls(" 1 ").unwrap(), 1);
        assert!(parse_max_calls("0").is_err());
        assert!(parse_max_calls("lots").is_err());
    }

    #[test]
    fn rpc_url_falls_back_to_network_default() {
        let bsc = network_config("bsc").unwrap();

        assert_eq!(
            config(None).resolve_rpc_url(&bsc).unwrap(),
            "https://bsc-dataseed1.binance.org"
        );
        assert_eq!(
            config(Some("http://localhost:8545")).resolve_rpc_url(&bsc).unwrap(),
            "http://localhost:8545"
        );
    }

    #[test]
    fn rpc_url_required_without_default() {
        let polygon_testnet = network_config("polygonTestnet").unwrap();

        assert!(config(None).resolve_rpc_url(&polygon_testnet).is_err());
    }
}
