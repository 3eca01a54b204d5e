// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction issuance for the faucet account.
//!
//! The node is the only source of nonce state, so an issuance reads the
//! pending nonce and submits the transfer in two separate round trips. The
//! issuer serializes that window with a per-identity mutex: one issuance in
//! flight at a time, later requests wait their turn (tokio's mutex is FIFO).

use std::{future::Future, sync::Arc, time::Duration};

use alloy::primitives::{Address, B256};
use axum::http::StatusCode;
use tokio::sync::Mutex;

use super::{
    client::{NodeConnector, NodeError},
    signing::{SignerIdentity, SigningError},
    transactions::build_grant,
    types::{parse_address, AddressError, FaucetInfo, TransferPolicy},
};

/// Default bound on each node call.
pub const DEFAULT_NODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Classified issuance failure.
///
/// Display strings are safe to return to callers: they never carry key
/// material or node connection details. The wrapped sources are for logs.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error(transparent)]
    InvalidRecipient(#[from] AddressError),

    #[error("failed to connect to a node")]
    NodeUnavailable(#[source] NodeError),

    #[error("failed to get a pending nonce")]
    NonceFetchFailed(#[source] NodeError),

    #[error("fail to sign transaction with the faucet account")]
    SigningFailed(#[source] SigningError),

    #[error("fail to send a transaction")]
    SubmissionFailed(#[source] NodeError),
}

impl IssueError {
    pub fn error_code(&self) -> &'static str {
        match self {
            IssueError::InvalidRecipient(_) => "invalid_recipient",
            IssueError::NodeUnavailable(_) => "node_unavailable",
            IssueError::NonceFetchFailed(_) => "nonce_fetch_failed",
            IssueError::SigningFailed(_) => "signing_failed",
            IssueError::SubmissionFailed(_) => "submission_failed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            IssueError::InvalidRecipient(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Builds, signs and relays faucet grants.
pub struct TransactionIssuer {
    identity: SignerIdentity,
    connector: Arc<dyn NodeConnector>,
    chain_id: u64,
    policy: TransferPolicy,
    node_timeout: Duration,
    guard: Mutex<()>,
}

impl TransactionIssuer {
    pub fn new(
        identity: SignerIdentity,
        connector: Arc<dyn NodeConnector>,
        chain_id: u64,
        policy: TransferPolicy,
        node_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            connector,
            chain_id,
            policy,
            node_timeout,
            guard: Mutex::new(()),
        }
    }

    pub fn faucet_address(&self) -> Address {
        self.identity.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn info(&self) -> FaucetInfo {
        FaucetInfo {
            address: self.faucet_address().to_checksum(None),
            chain_id: self.chain_id,
            amount: self.policy.amount.to_string(),
            gas_limit: self.policy.gas_limit,
            gas_price: self.policy.gas_price.to_string(),
        }
    }

    /// Send one grant to `recipient` and return the node's transaction hash.
    ///
    /// The recipient is validated before any node interaction. No step is
    /// retried; the first failure aborts the rest.
    pub async fn issue(&self, recipient: &str) -> Result<B256, IssueError> {
        let to = parse_address(recipient)?;

        match self.issue_locked(to).await {
            Ok(hash) => Ok(hash),
            Err(e) => {
                match std::error::Error::source(&e) {
                    Some(source) => tracing::warn!(
                        recipient = %to,
                        code = e.error_code(),
                        error = %source,
                        "Faucet transfer failed"
                    ),
                    None => tracing::warn!(
                        recipient = %to,
                        code = e.error_code(),
                        "Faucet transfer failed"
                    ),
                }
                Err(e)
            }
        }
    }

    async fn issue_locked(&self, to: Address) -> Result<B256, IssueError> {
        let _guard = self.guard.lock().await;

        let session = self
            .bounded(self.connector.connect())
            .await
            .map_err(IssueError::NodeUnavailable)?;

        let nonce = self
            .bounded(session.pending_nonce_at(self.identity.address()))
            .await
            .map_err(|e| match e {
                NodeError::Connect(_) => IssueError::NodeUnavailable(e),
                _ => IssueError::NonceFetchFailed(e),
            })?;

        let transfer = build_grant(nonce, to, &self.policy);
        let signed = self
            .identity
            .sign(&transfer, self.chain_id)
            .map_err(IssueError::SigningFailed)?;

        let tx_hash = self
            .bounded(session.send_raw_transaction(&signed.encoded()))
            .await
            .map_err(IssueError::SubmissionFailed)?;

        if tx_hash != signed.hash() {
            tracing::warn!(
                node_hash = %tx_hash,
                local_hash = %signed.hash(),
                "Node reported a different transaction hash"
            );
        }
        tracing::info!(recipient = %to, nonce, tx_hash = %tx_hash, "Faucet transfer submitted");

        Ok(tx_hash)
    }

    /// Connect and ask the node for its chain id.
    pub async fn probe(&self) -> Result<u64, NodeError> {
        let session = self.bounded(self.connector.connect()).await?;
        self.bounded(session.chain_id()).await
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, NodeError>>,
    ) -> Result<T, NodeError> {
        match tokio::time::timeout(self.node_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(NodeError::Timeout(self.node_timeout)),
        }
    }
}
