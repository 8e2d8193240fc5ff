// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types for batched contract reads.

use thiserror::Error;

/// Errors raised while resolving a function in the ABI dispatch table or
/// converting values to and from calldata.
#[derive(Debug, Error)]
pub enum AbiError {
    /// No function with this name or signature exists in the ABI.
    #[error("function `{0}` not found in ABI")]
    UnknownFunction(String),
    /// The plain name matches several overloads.
    #[error("function name `{name}` is overloaded, use one of: {}", .candidates.join(", "))]
    Ambiguous { name: String, candidates: Vec<String> },
    /// The ABI document itself could not be parsed.
    #[error("invalid ABI document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
    /// Values did not match the function's parameter or return types.
    #[error(transparent)]
    Codec(#[from] alloy::dyn_abi::Error),
}

/// Errors raised by an [`AggregatorHandle`](super::AggregatorHandle).
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The `eth_call` to the aggregator contract failed or reverted.
    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),
    /// The aggregator answered with a different number of results than calls.
    #[error("aggregator returned {got} results for {expected} calls")]
    ResultCount { expected: usize, got: usize },
    /// Any other endpoint failure.
    #[error("{0}")]
    Other(String),
}

/// Errors returned by [`aggregate`](super::aggregate).
///
/// Any variant aborts the whole aggregation: no results are returned for the
/// failing chunk or for the chunks after it.
#[derive(Debug, Error)]
pub enum MulticallError {
    /// Call `index` could not be encoded against its ABI function.
    #[error("failed to encode call {index} (`{function}`)")]
    Encoding {
        index: usize,
        function: String,
        #[source]
        source: AbiError,
    },
    /// The aggregate read for chunk `chunk` failed.
    #[error("aggregate read failed for chunk {chunk}")]
    Endpoint {
        chunk: usize,
        #[source]
        source: EndpointError,
    },
    /// The raw result of call `index` did not match its return types.
    #[error("failed to decode result {index} (`{function}`)")]
    Decoding {
        index: usize,
        function: String,
        #[source]
        source: AbiError,
    },
    /// A chunk size of zero was requested.
    #[error("max calls per chunk must be at least 1")]
    InvalidChunkSize,
}
