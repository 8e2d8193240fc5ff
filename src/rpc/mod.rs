// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! RPC module for talking to the chain.

mod provider;

pub use provider::create_provider;
