// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! ApeSwap DEX read tooling.

use std::path::PathBuf;

use ape_dex_tools::config::{parse_max_calls, Config};
use ape_dex_tools::multicall::AbiRegistry;
use ape_dex_tools::pairs::{ape_factory_abi, sync_pair_addresses};
use ape_dex_tools::rpc::create_provider;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ape-dex-tools", version, about = "ApeSwap DEX read tooling")]
struct Cli {
    /// Network preset (bsc, testnet, polygon, ... with optional -fork suffix).
    #[arg(long, global = true)]
    network: Option<String>,

    /// RPC endpoint, defaults to the network's public endpoint.
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch pair addresses the local address book is missing.
    QueryPairs {
        /// Address book path, without the `.json` extension.
        #[arg(long)]
        pairs_file: Option<PathBuf>,

        /// Calls per aggregate read.
        #[arg(long, value_parser = parse_max_calls)]
        max_calls_per_tx: Option<usize>,

        /// ApeFactory build artifact to take the ABI from.
        #[arg(long)]
        factory_abi: Option<PathBuf>,
    },
    /// Print the addresses configured for the network.
    Network,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().map_err(|e| {
        error!("Failed to load config: {}", e);
        e
    })?;
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = Some(rpc_url);
    }

    let network = config.network_config()?;

    match cli.command {
        Command::QueryPairs {
            pairs_file,
            max_calls_per_tx,
            factory_abi,
        } => {
            if let Some(pairs_file) = pairs_file {
                config.pairs_file = pairs_file;
            }
            if let Some(max_calls_per_tx) = max_calls_per_tx {
                config.max_calls_per_tx = max_calls_per_tx;
            }
            if let Some(factory_abi) = factory_abi {
                config.factory_abi = Some(factory_abi);
            }

            let abi = match &config.factory_abi {
                Some(path) => AbiRegistry::from_artifact_file(path)?,
                None => ape_factory_abi()?,
            };

            info!("🚀 Syncing {} pair addresses", network.name);
            let provider = create_provider(&config.resolve_rpc_url(&network)?)?;
            let report = sync_pair_addresses(
                provider,
                &network,
                &abi,
                &config.pairs_file,
                config.max_calls_per_tx,
            )
            .await?;

            info!("✅ Done: {} pairs, {} new", report.total_pairs, report.added);
        }
        Command::Network => {
            println!("{}", serde_json::to_string_pretty(&network)?);
        }
    }

    Ok(())
}
