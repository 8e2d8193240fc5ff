// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batched contract reads through an on-chain aggregator.
//!
//! Logical calls are split into chunks of at most `max_calls_per_tx`, every
//! chunk is submitted as one aggregate read, and the decoded results come
//! back aligned with the input: `results[i]` belongs to `calls[i]`.

mod abi;
mod aggregator;
mod error;

pub use abi::AbiRegistry;
pub use aggregator::{AggregatorHandle, IMulticall2, Multicall2Aggregator};
pub use error::{AbiError, EndpointError, MulticallError};

use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes};
use tracing::debug;

/// Default ceiling on calls per aggregate read.
///
/// Sized for BSC gas and payload limits; other chains may need less.
pub const DEFAULT_MAX_CALLS_PER_TX: usize = 1000;

/// Decoded return values of a single call.
pub type DecodedResult = Vec<DynSolValue>;

/// A read request against a deployed contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    address: Address,
    function_name: String,
    params: Vec<DynSolValue>,
}

impl Call {
    /// Call `function_name` (plain name or full signature) on `address`
    /// without arguments.
    pub fn new(address: Address, function_name: impl Into<String>) -> Self {
        Self {
            address,
            function_name: function_name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<DynSolValue>) -> Self {
        self.params = params;
        self
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn params(&self) -> &[DynSolValue] {
        &self.params
    }
}

/// Split `calls` into contiguous chunks of `max_size`, the last one possibly
/// shorter.
///
/// # Panics
///
/// Panics if `max_size` is 0.
pub fn chunk<T>(calls: &[T], max_size: usize) -> Vec<&[T]> {
    calls.chunks(max_size).collect()
}

/// Execute `calls` through `endpoint`, one aggregate read per chunk.
///
/// Function names are resolved for every call before the first request, so
/// an unknown or ambiguous name fails without touching the endpoint. Chunks
/// run sequentially and the first failure aborts the whole batch.
pub async fn aggregate<H: AggregatorHandle>(
    endpoint: &H,
    abi: &AbiRegistry,
    calls: &[Call],
    max_calls_per_tx: usize,
) -> Result<Vec<DecodedResult>, MulticallError> {
    if max_calls_per_tx == 0 {
        return Err(MulticallError::InvalidChunkSize);
    }

    let functions = calls
        .iter()
        .enumerate()
        .map(|(index, call)| {
            abi.function(&call.function_name)
                .map_err(|source| MulticallError::Encoding {
                    index,
                    function: call.function_name.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<&Function>, _>>()?;

    let chunks = chunk(calls, max_calls_per_tx);
    let mut results = Vec::with_capacity(calls.len());

    for (chunk_index, current) in chunks.iter().enumerate() {
        let offset = chunk_index * max_calls_per_tx;

        let calldata = current
            .iter()
            .enumerate()
            .map(|(i, call)| {
                abi::encode_call(functions[offset + i], &call.params)
                    .map(|data| (call.address, data))
                    .map_err(|source| MulticallError::Encoding {
                        index: offset + i,
                        function: call.function_name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<(Address, Bytes)>, _>>()?;

        debug!(
            "Aggregating chunk {}/{} ({} calls)",
            chunk_index + 1,
            chunks.len(),
            calldata.len()
        );

        let raw = endpoint
            .aggregate(calldata)
            .await
            .map_err(|source| MulticallError::Endpoint {
                chunk: chunk_index,
                source,
            })?;

        if raw.len() != current.len() {
            return Err(MulticallError::Endpoint {
                chunk: chunk_index,
                source: EndpointError::ResultCount {
                    expected: current.len(),
                    got: raw.len(),
                },
            });
        }

        for (i, (call, data)) in current.iter().zip(raw.iter()).enumerate() {
            let decoded = abi::decode_return(functions[offset + i], data).map_err(|source| {
                MulticallError::Decoding {
                    index: offset + i,
                    function: call.function_name.clone(),
                    source,
                }
            })?;
            results.push(decoded);
        }
    }

    Ok(results)
}
