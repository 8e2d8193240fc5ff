// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Aggregate-read endpoints.

use alloy::{
    primitives::{Address, Bytes},
    providers::Provider,
    sol,
};
use std::future::Future;
use tracing::debug;

use super::error::EndpointError;

// Multicall2 `aggregate`, also exposed unchanged by Multicall3
sol! {
    #[sol(rpc)]
    interface IMulticall2 {
        struct Call {
            address target;
            bytes callData;
        }

        function aggregate(Call[] calldata calls)
            external returns (uint256 blockNumber, bytes[] memory returnData);
    }
}

/// A contract able to execute many read calls in one request.
///
/// Implementations return exactly one raw result per submitted
/// `(target, calldata)` pair, in submission order.
pub trait AggregatorHandle {
    fn aggregate(
        &self,
        calls: Vec<(Address, Bytes)>,
    ) -> impl Future<Output = Result<Vec<Bytes>, EndpointError>> + Send;
}

/// Aggregator backed by a deployed Multicall2/Multicall3 contract.
///
/// Every invocation is an `eth_call`, nothing is ever broadcast.
#[derive(Debug, Clone)]
pub struct Multicall2Aggregator<P: Provider + Clone> {
    provider: P,
    contract_address: Address,
}

impl<P: Provider + Clone> Multicall2Aggregator<P> {
    /// Create an aggregator for the multicall contract at `contract_address`.
    pub fn new(provider: P, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
        }
    }

    pub fn address(&self) -> Address {
        self.contract_address
    }
}

impl<P: Provider + Clone> AggregatorHandle for Multicall2Aggregator<P> {
    async fn aggregate(&self, calls: Vec<(Address, Bytes)>) -> Result<Vec<Bytes>, EndpointError> {
        let contract = IMulticall2::new(self.contract_address, &self.provider);
        let expected = calls.len();

        let calls = calls
            .into_iter()
            .map(|(target, call_data)| IMulticall2::Call {
                target,
                callData: call_data,
            })
            .collect::<Vec<_>>();

        let result = contract.aggregate(calls).call().await?;
        debug!(
            "Multicall {:?} answered {} results at block {}",
            self.contract_address,
            result.returnData.len(),
            result.blockNumber
        );

        if result.returnData.len() != expected {
            return Err(EndpointError::ResultCount {
                expected,
                got: result.returnData.len(),
            });
        }

        Ok(result.returnData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::dyn_abi::DynSolValue;
    use alloy::primitives::{address, U256};
    use alloy::providers::ProviderBuilder;
    use alloy::transports::mock::Asserter;

    const MULTICALL: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");
    const FACTORY: Address = address!("0841BD0B734E4F5853f0dD8d7Ea041c241fb0Da6");

    fn encoded_aggregate_return(block: u64, blobs: &[&[u8]]) -> Bytes {
        DynSolValue::Tuple(vec![
            DynSolValue::Uint(U256::from(block), 256),
            DynSolValue::Array(
                blobs
                    .iter()
                    .map(|blob| DynSolValue::Bytes(blob.to_vec()))
                    .collect(),
            ),
        ])
        .abi_encode_params()
        .into()
    }

    #[tokio::test]
    async fn returns_raw_results_in_order() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_success(&encoded_aggregate_return(42, &[&[1, 2], &[3]]));

        let aggregator = Multicall2Aggregator::new(provider, MULTICALL);
        let results = aggregator
            .aggregate(vec![
                (FACTORY, Bytes::from_static(&[0xaa])),
                (FACTORY, Bytes::from_static(&[0xbb])),
            ])
            .await
            .unwrap();

        assert_eq!(results, vec![Bytes::from_static(&[1, 2]), Bytes::from_static(&[3])]);
    }

    #[tokio::test]
    async fn short_answer_is_an_endpoint_error() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_success(&encoded_aggregate_return(42, &[&[1]]));

        let aggregator = Multicall2Aggregator::new(provider, MULTICALL);
        let err = aggregator
            .aggregate(vec![
                (FACTORY, Bytes::from_static(&[0xaa])),
                (FACTORY, Bytes::from_static(&[0xbb])),
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointError::ResultCount { expected: 2, got: 1 }));
    }

    #[tokio::test]
    async fn rpc_failure_is_propagated() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_failure_msg("execution reverted");

        let aggregator = Multicall2Aggregator::new(provider, MULTICALL);
        let err = aggregator
            .aggregate(vec![(FACTORY, Bytes::from_static(&[0xaa]))])
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointError::Contract(_)));
    }
}
