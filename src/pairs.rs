// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pair address book: keeps a local copy of the factory's `allPairs` list.

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::files::{json_file_exists, read_json_file, write_json_file, write_json_file_with_date};
use crate::multicall::{aggregate, AbiRegistry, Call, DecodedResult, Multicall2Aggregator};
use crate::networks::NetworkConfig;

sol! {
    #[sol(rpc)]
    interface IApeFactory {
        function allPairsLength() external view returns (uint256);
    }
}

/// Read-only subset of the ApeFactory ABI used when no build artifact is given.
pub const APE_FACTORY_ABI: &str = r#"[
    {"type":"function","name":"allPairs","stateMutability":"view",
     "inputs":[{"name":"","type":"uint256","internalType":"uint256"}],
     "outputs":[{"name":"","type":"address","internalType":"address"}]},
    {"type":"function","name":"allPairsLength","stateMutability":"view",
     "inputs":[],
     "outputs":[{"name":"","type":"uint256","internalType":"uint256"}]},
    {"type":"function","name":"getPair","stateMutability":"view",
     "inputs":[{"name":"","type":"address","internalType":"address"},
               {"name":"","type":"address","internalType":"address"}],
     "outputs":[{"name":"","type":"address","internalType":"address"}]},
    {"type":"function","name":"feeTo","stateMutability":"view",
     "inputs":[],
     "outputs":[{"name":"","type":"address","internalType":"address"}]},
    {"type":"function","name":"feeToSetter","stateMutability":"view",
     "inputs":[],
     "outputs":[{"name":"","type":"address","internalType":"address"}]}
]"#;

/// Dispatch table for the built-in factory ABI.
pub fn ape_factory_abi() -> Result<AbiRegistry> {
    AbiRegistry::from_json(APE_FACTORY_ABI).context("Built-in ApeFactory ABI is invalid")
}

/// Ordered pair addresses, index `i` being `allPairs(i)`.
#[derive(Debug, Clone)]
pub struct PairAddressBook {
    path: PathBuf,
    pairs: Vec<Address>,
}

impl PairAddressBook {
    /// Load `<path>.json`, or start an empty book if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let pairs = if json_file_exists(&path) {
            read_json_file(&path)?
        } else {
            info!("No pair address file at {}.json, starting fresh", path.display());
            Vec::new()
        };

        info!("📊 Loaded {} known pairs", pairs.len());
        Ok(Self { path, pairs })
    }

    pub fn pairs(&self) -> &[Address] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Append newly discovered pairs.
    pub fn extend(&mut self, pairs: impl IntoIterator<Item = Address>) {
        self.pairs.extend(pairs);
    }

    /// Write a dated snapshot, then the main file.
    pub fn save(&self) -> Result<()> {
        write_json_file_with_date(&self.path, &self.pairs)?;
        write_json_file(&self.path, &self.pairs)?;
        info!("💾 Saved pairs to file. See {}.json", self.path.display());
        Ok(())
    }
}

/// One `allPairs(i)` call for every index in `known..total`.
pub fn pending_pair_calls(factory: Address, known: usize, total: usize) -> Vec<Call> {
    (known..total)
        .map(|pair_id| {
            Call::new(factory, "allPairs")
                .with_params(vec![DynSolValue::Uint(U256::from(pair_id), 256)])
        })
        .collect()
}

/// Take the pair address out of each decoded `allPairs` result.
pub fn extract_addresses(results: &[DecodedResult]) -> Result<Vec<Address>> {
    results
        .iter()
        .enumerate()
        .map(|(i, values)| match values.first() {
            Some(DynSolValue::Address(pair)) => Ok(*pair),
            other => Err(anyhow!("Unexpected allPairs result {}: {:?}", i, other)),
        })
        .collect()
}

/// Outcome of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairSyncReport {
    pub total_pairs: usize,
    pub added: usize,
}

/// Fetch every pair the book does not know yet and persist the result.
pub async fn sync_pair_addresses<P: Provider + Clone>(
    provider: P,
    network: &NetworkConfig,
    factory_abi: &AbiRegistry,
    book_path: impl AsRef<Path>,
    max_calls_per_tx: usize,
) -> Result<PairSyncReport> {
    let factory = network.factory()?;
    let multicall = network.multicall()?;
    let mut book = PairAddressBook::load(book_path)?;

    let length = IApeFactory::new(factory, &provider)
        .allPairsLength()
        .call()
        .await
        .with_context(|| format!("allPairsLength() failed on factory {:?}", factory))?;
    let total_pairs =
        usize::try_from(length).map_err(|_| anyhow!("Pair count {} does not fit in usize", length))?;

    if total_pairs < book.len() {
        return Err(anyhow!(
            "Factory reports {} pairs but the address book already holds {}",
            total_pairs,
            book.len()
        ));
    }

    let calls = pending_pair_calls(factory, book.len(), total_pairs);
    if !calls.is_empty() {
        info!("🔎 Fetching {} new pairs through multicall {:?}", calls.len(), multicall);
        let aggregator = Multicall2Aggregator::new(provider, multicall);
        let results = aggregate(&aggregator, factory_abi, &calls, max_calls_per_tx).await?;
        book.extend(extract_addresses(&results)?);
        book.save()?;
    }

    info!("Total pairs: {}.", total_pairs);
    info!("Added {} new pairs!", calls.len());

    Ok(PairSyncReport {
        total_pairs,
        added: calls.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const FACTORY: Address = address!("0841BD0B734E4F5853f0dD8d7Ea041c241fb0Da6");

    #[test]
    fn builtin_abi_loads() {
        let abi = ape_factory_abi().unwrap();
        assert!(abi.function("allPairs").is_ok());
        assert!(abi.function("allPairsLength").is_ok());
    }

    #[test]
    fn pending_calls_cover_unknown_indexes() {
        let calls = pending_pair_calls(FACTORY, 3, 6);

        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.address() == FACTORY && c.function_name() == "allPairs"));
        assert_eq!(calls[0].params(), &[DynSolValue::Uint(U256::from(3), 256)]);
        assert_eq!(calls[2].params(), &[DynSolValue::Uint(U256::from(5), 256)]);
        assert!(pending_pair_calls(FACTORY, 6, 6).is_empty());
    }

    #[test]
    fn extracts_first_value_as_address() {
        let pair = address!("00000000000000000000000000000000000000aa");
        let results = vec![vec![DynSolValue::Address(pair)]];

        assert_eq!(extract_addresses(&results).unwrap(), vec![pair]);
        assert!(extract_addresses(&[vec![DynSolValue::Bool(true)]]).is_err());
        assert!(extract_addresses(&[vec![]]).is_err());
    }

    #[test]
    fn book_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ApePairAddresses");

        let mut book = PairAddressBook::load(&path).unwrap();
        assert!(book.is_empty());

        book.extend([FACTORY]);
        book.save().unwrap();

        let reloaded = PairAddressBook::load(&path).unwrap();
        assert_eq!(reloaded.pairs(), &[FACTORY]);
    }
}
