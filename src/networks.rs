// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-network contract addresses.

use alloy::primitives::{address, Address};
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::info;

/// Multicall3 is deployed at the same address on every supported chain.
const MULTICALL3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

/// Addresses and endpoints for one network.
///
/// Fields the deployment does not have yet are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub chain_id: u64,
    pub factory: Option<Address>,
    pub wrapped_native: Option<Address>,
    pub router: Option<Address>,
    pub multicall: Option<Address>,
    pub rpc_url: Option<&'static str>,
}

impl NetworkConfig {
    /// Factory address, or an error naming the network.
    pub fn factory(&self) -> Result<Address> {
        self.factory
            .ok_or_else(|| anyhow!("No factory address configured for network {}", self.name))
    }

    /// Multicall address, or an error naming the network.
    pub fn multicall(&self) -> Result<Address> {
        self.multicall
            .ok_or_else(|| anyhow!("No multicall address configured for network {}", self.name))
    }
}

const BSC: NetworkConfig = NetworkConfig {
    name: "bsc",
    chain_id: 56,
    factory: Some(address!("0841BD0B734E4F5853f0dD8d7Ea041c241fb0Da6")),
    wrapped_native: Some(address!("bb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c")),
    router: Some(address!("cF0feBd3f17CEf5b47b0cD257aCf6025c5BFf3b7")),
    multicall: Some(MULTICALL3),
    rpc_url: Some("https://bsc-dataseed1.binance.org"),
};

const BSC_TESTNET: NetworkConfig = NetworkConfig {
    name: "testnet",
    chain_id: 97,
    factory: Some(address!("152349604d49c2Af10ADeE94b918b051104a143E")),
    wrapped_native: Some(address!("ae13d989daC2f0dEbFf460aC112a837C89BAa7cd")),
    router: None,
    multicall: Some(MULTICALL3),
    rpc_url: Some("https://data-seed-prebsc-1-s1.binance.org:8545"),
};

const DEVELOPMENT: NetworkConfig = NetworkConfig {
    name: "development",
    chain_id: 1337,
    factory: Some(address!("804962FAc9268A54dF121f129C4a21d7c0aD70b7")),
    wrapped_native: None,
    router: None,
    multicall: None,
    rpc_url: Some("http://127.0.0.1:8545"),
};

const POLYGON: NetworkConfig = NetworkConfig {
    name: "polygon",
    chain_id: 137,
    factory: Some(address!("Cf083Be4164828f00cAE704EC15a36D711491284")),
    wrapped_native: Some(address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270")),
    router: None,
    multicall: Some(MULTICALL3),
    rpc_url: Some("https://polygon-rpc.com"),
};

const POLYGON_TESTNET: NetworkConfig = NetworkConfig {
    name: "polygonTestnet",
    chain_id: 80001,
    factory: Some(address!("e145a77c21437e3FD32ce2731833114F0B53405b")),
    wrapped_native: None,
    router: None,
    multicall: Some(MULTICALL3),
    rpc_url: None,
};

/// Look up the preset for `network`. A `-fork` suffix maps to the base
/// network.
pub fn network_config(network: &str) -> Result<NetworkConfig> {
    let base = network.strip_suffix("-fork").unwrap_or(network);
    let config = match base {
        "bsc" => BSC,
        "testnet" => BSC_TESTNET,
        "development" if base == network => DEVELOPMENT,
        "polygon" => POLYGON,
        "polygonTestnet" => POLYGON_TESTNET,
        _ => return Err(anyhow!("No config found for network {}.", network)),
    };

    info!("Using {} config.", network);
    Ok(config)
}
