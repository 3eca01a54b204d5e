// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Startup Configuration
//!
//! The faucet is configured entirely from the command line. Positional
//! arguments are required; flags have defaults.
//!
//! | Argument | Description | Default |
//! |----------|-------------|---------|
//! | `CHAIN_ID` | Chain identifier bound into every signature | Required |
//! | `ENDPOINT` | Node JSON-RPC endpoint, e.g. `http://127.0.0.1:8551` | Required |
//! | `PRIVATE_KEY` | Faucet private key, 64 hex digits | Required |
//! | `--listen` | HTTP bind address | `0.0.0.0:80` |
//! | `--node-timeout-secs` | Bound on each node call | `10` |
//! | `--log-format` | Logging format (`pretty` or `json`) | `pretty` |
//!
//! `RUST_LOG` overrides the log filter (default `info,tower_http=debug`).

use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::{error::ErrorKind, Parser};

use crate::{
    blockchain::{
        KeyError, NodeError, RpcNodeConnector, SignerIdentity, TransactionIssuer,
        DEFAULT_NODE_TIMEOUT, FAUCET_POLICY,
    },
    telemetry::LogFormat,
};

/// Default HTTP bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:80";

/// Command line. Not `Debug`: it holds the private key.
#[derive(Parser)]
#[command(name = "faucet", version, about = "Native token faucet")]
pub struct Cli {
    /// Chain identifier bound into every signature
    pub chain_id: String,

    /// Node JSON-RPC endpoint, e.g. http://127.0.0.1:8551
    pub endpoint: String,

    /// Faucet private key (64 hex digits)
    pub private_key: String,

    /// HTTP bind address
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: SocketAddr,

    /// Upper bound on each node call, in seconds
    #[arg(long, default_value_t = DEFAULT_NODE_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub node_timeout_secs: u64,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Fatal startup failures. None of the messages include the private key.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid chainID: {0}")]
    InvalidChainId(String),

    #[error("Invalid endpoint. Use the endpoint such as http://127.0.0.1:8551 ({0})")]
    InvalidEndpoint(#[source] NodeError),

    #[error("Node is unreachable: {0}")]
    NodeUnreachable(#[source] NodeError),

    #[error("Invalid faucet private key: {0}")]
    InvalidKeyMaterial(#[source] KeyError),

    #[error("HTTP server error: {0}")]
    Server(#[from] std::io::Error),
}

impl From<clap::Error> for StartupError {
    fn from(err: clap::Error) -> Self {
        // clap's rendered error can quote the offending value, which may be the key.
        StartupError::InvalidArguments(
            err.kind()
                .as_str()
                .unwrap_or("unexpected arguments")
                .to_string(),
        )
    }
}

/// Whether clap should print the error itself (help or version output).
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// Validated configuration.
pub struct FaucetConfig {
    pub chain_id: u64,
    pub connector: RpcNodeConnector,
    pub identity: SignerIdentity,
    pub listen: SocketAddr,
    pub node_timeout: Duration,
}

impl FaucetConfig {
    /// Validate in order: chain id, endpoint, private key. No I/O.
    pub fn from_cli(cli: Cli) -> Result<Self, StartupError> {
        let chain_id = cli
            .chain_id
            .trim()
            .parse::<u64>()
            .map_err(|e| StartupError::InvalidChainId(e.to_string()))?;

        let connector =
            RpcNodeConnector::new(&cli.endpoint).map_err(StartupError::InvalidEndpoint)?;

        let identity =
            SignerIdentity::from_hex(&cli.private_key).map_err(StartupError::InvalidKeyMaterial)?;

        Ok(Self {
            chain_id,
            connector,
            identity,
            listen: cli.listen,
            node_timeout: Duration::from_secs(cli.node_timeout_secs),
        })
    }

    pub fn into_issuer(self) -> TransactionIssuer {
        TransactionIssuer::new(
            self.identity,
            Arc::new(self.connector),
            self.chain_id,
            FAUCET_POLICY,
            self.node_timeout,
        )
    }
}

/// Check that the node answers, and warn when it serves a different chain.
pub async fn verify_node(issuer: &TransactionIssuer) -> Result<(), StartupError> {
    let node_chain_id = issuer
        .probe()
        .await
        .map_err(StartupError::NodeUnreachable)?;

    if node_chain_id != issuer.chain_id() {
        tracing::warn!(
            configured = issuer.chain_id(),
            node = node_chain_id,
            "Node reports a different chain id; signed transfers may be rejected"
        );
    }
    Ok(())
}
