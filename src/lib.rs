// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Off-chain read tooling for ApeSwap DEX deployments.

pub mod config;
pub mod files;
pub mod multicall;
pub mod networks;
pub mod pairs;
pub mod rpc;
