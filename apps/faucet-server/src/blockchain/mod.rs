// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration for the faucet account.
//!
//! This module provides functionality for:
//! - Deriving the faucet signing identity from its private key
//! - Building fixed-policy native transfers
//! - Talking to a remote JSON-RPC node (nonce lookup, broadcast)
//! - Issuing grants under a per-account mutual exclusion guard

pub mod client;
pub mod issuer;
pub mod signing;
pub mod transactions;
pub mod types;

pub use client::{NodeConnector, NodeError, NodeSession, RpcNodeConnector};
pub use issuer::{IssueError, TransactionIssuer, DEFAULT_NODE_TIMEOUT};
pub use signing::{KeyError, SignerIdentity, SigningError};
pub use transactions::{build_grant, build_transfer, SignedTransfer, UnsignedTransfer};
pub use types::*;
