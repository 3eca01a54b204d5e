// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Node client: the faucet's view of a remote JSON-RPC node.

use std::time::Duration;

use alloy::{
    eips::BlockId,
    network::Ethereum,
    primitives::{Address, B256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;
use url::Url;

/// HTTP provider type (with the default fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Errors reported by a node. Details are for logs, not for callers.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("Invalid node endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Node call timed out after {0:?}")]
    Timeout(Duration),
}

impl From<TransportError> for NodeError {
    /// Transport failures (refused, reset, bad HTTP status) mean the node
    /// could not be reached; anything else is an answer from the node.
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::Transport(kind) => NodeError::Connect(kind.to_string()),
            other => NodeError::Rpc(other.to_string()),
        }
    }
}

/// Opens sessions against a node.
#[async_trait]
pub trait NodeConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn NodeSession>, NodeError>;
}

/// One open connection. Dropping it closes the connection.
#[async_trait]
pub trait NodeSession: Send + Sync {
    /// Next nonce the node expects for `address`, counting pending transactions.
    async fn pending_nonce_at(&self, address: Address) -> Result<u64, NodeError>;

    /// Relay a signed, 2718-encoded transaction and return its hash.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, NodeError>;

    /// Chain identifier the node reports. Used as a reachability check.
    async fn chain_id(&self) -> Result<u64, NodeError>;
}

/// Connector for an HTTP(S) JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcNodeConnector {
    endpoint: Url,
}

impl RpcNodeConnector {
    /// Accepts `http` and `https` URLs only.
    pub fn new(endpoint: &str) -> Result<Self, NodeError> {
        let endpoint: Url = endpoint
            .parse()
            .map_err(|e: url::ParseError| NodeError::InvalidEndpoint(e.to_string()))?;

        match endpoint.scheme() {
            "http" | "https" => Ok(Self { endpoint }),
            other => Err(NodeError::InvalidEndpoint(format!(
                "unsupported scheme `{other}`, use e.g. http://127.0.0.1:8551"
            ))),
        }
    }

}

#[async_trait]
impl NodeConnector for RpcNodeConnector {
    async fn connect(&self) -> Result<Box<dyn NodeSession>, NodeError> {
        let provider = ProviderBuilder::new().connect_http(self.endpoint.clone());
        Ok(Box::new(RpcSession { provider }))
    }
}

struct RpcSession {
    provider: HttpProvider,
}

#[async_trait]
impl NodeSession for RpcSession {
    async fn pending_nonce_at(&self, address: Address) -> Result<u64, NodeError> {
        self.provider
            .get_transaction_count(address)
            .block_id(BlockId::pending())
            .await
            .map_err(NodeError::from)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, NodeError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(NodeError::from)?;

        Ok(*pending.tx_hash())
    }

    async fn chain_id(&self) -> Result<u64, NodeError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(NodeError::from)
    }
}

/// In-memory node used by unit tests.
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    };

    use alloy::{
        consensus::TxEnvelope,
        eips::eip2718::Decodable2718,
        primitives::keccak256,
    };

    use super::*;

    /// Shared, inspectable node state.
    #[derive(Default)]
    pub(crate) struct MockNodeState {
        pub pending_nonce: Mutex<u64>,
        pub chain_id: u64,
        pub nonce_delay: Option<Duration>,
        pub fail_connect: AtomicBool,
        pub fail_nonce: AtomicBool,
        pub refuse_nonce: AtomicBool,
        pub fail_send: AtomicBool,
        pub hang_nonce: AtomicBool,
        pub connects: AtomicUsize,
        pub nonce_calls: AtomicUsize,
        pub send_calls: AtomicUsize,
        pub open_sessions: AtomicUsize,
        pub max_open_sessions: AtomicUsize,
        pub submitted: Mutex<Vec<TxEnvelope>>,
    }

    impl MockNodeState {
        pub fn with_nonce(nonce: u64) -> Self {
            Self {
                pending_nonce: Mutex::new(nonce),
                chain_id: 1001,
                ..Default::default()
            }
        }

        pub fn total_calls(&self) -> usize {
            self.connects.load(Ordering::SeqCst)
                + self.nonce_calls.load(Ordering::SeqCst)
                + self.send_calls.load(Ordering::SeqCst)
        }

        pub fn submitted_nonces(&self) -> Vec<u64> {
            self.submitted
                .lock()
                .unwrap()
                .iter()
                .map(|tx| tx.as_legacy().expect("legacy transaction").tx().nonce)
                .collect()
        }
    }

    #[derive(Clone)]
    pub(crate) struct MockConnector {
        pub state: Arc<MockNodeState>,
    }

    impl MockConnector {
        pub fn new(state: MockNodeState) -> Self {
            Self {
                state: Arc::new(state),
            }
        }
    }

    #[async_trait]
    impl NodeConnector for MockConnector {
        async fn connect(&self) -> Result<Box<dyn NodeSession>, NodeError> {
            self.state.connects.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_connect.load(Ordering::SeqCst) {
                return Err(NodeError::Connect("connection refused".into()));
            }
            let open = self.state.open_sessions.fetch_add(1, Ordering::SeqCst) + 1;
            self.state.max_open_sessions.fetch_max(open, Ordering::SeqCst);
            Ok(Box::new(MockSession {
                state: self.state.clone(),
            }))
        }
    }

    struct MockSession {
        state: Arc<MockNodeState>,
    }

    impl Drop for MockSession {
        fn drop(&mut self) {
            self.state.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl NodeSession for MockSession {
        async fn pending_nonce_at(&self, _address: Address) -> Result<u64, NodeError> {
            self.state.nonce_calls.fetch_add(1, Ordering::SeqCst);
            if self.state.hang_nonce.load(Ordering::SeqCst) {
                std::future::pending::<()>().await;
            }
            if self.state.refuse_nonce.load(Ordering::SeqCst) {
                return Err(NodeError::Connect("connection refused".into()));
            }
            if self.state.fail_nonce.load(Ordering::SeqCst) {
                return Err(NodeError::Rpc("internal error".into()));
            }
            let nonce = *self.state.pending_nonce.lock().unwrap();
            if let Some(delay) = self.state.nonce_delay {
                tokio::time::sleep(delay).await;
            }
            Ok(nonce)
        }

        async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256, NodeError> {
            self.state.send_calls.fetch_add(1, Ordering::SeqCst);
            if self.state.fail_send.load(Ordering::SeqCst) {
                return Err(NodeError::Rpc("insufficient funds".into()));
            }
            let envelope = TxEnvelope::decode_2718(&mut &raw[..])
                .map_err(|e| NodeError::Rpc(e.to_string()))?;
            let nonce = envelope
                .as_legacy()
                .ok_or_else(|| NodeError::Rpc("unexpected transaction type".into()))?
                .tx()
                .nonce;

            let mut pending = self.state.pending_nonce.lock().unwrap();
            if nonce != *pending {
                return Err(NodeError::Rpc(format!("nonce {nonce} does not match {pending}")));
            }
            *pending += 1;
            drop(pending);

            self.state.submitted.lock().unwrap().push(envelope);
            Ok(keccak256(raw))
        }

        async fn chain_id(&self) -> Result<u64, NodeError> {
            Ok(self.state.chain_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_connector_validates_endpoint() {
        assert!(RpcNodeConnector::new("http://127.0.0.1:8551").is_ok());
        assert!(RpcNodeConnector::new("https://public-en-kairos.node.kaia.io").is_ok());

        assert!(matches!(
            RpcNodeConnector::new("not a url"),
            Err(NodeError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            RpcNodeConnector::new("ws://127.0.0.1:8552"),
            Err(NodeError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn transport_errors_are_connection_failures() {
        let local = TransportError::local_usage_str("bad request");
        assert!(matches!(NodeError::from(local), NodeError::Rpc(_)));

        let transport: TransportError =
            RpcError::Transport(alloy::transports::TransportErrorKind::BackendGone);
        assert!(matches!(NodeError::from(transport), NodeError::Connect(_)));
    }

    #[tokio::test]
    async fn closed_port_is_a_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let connector = RpcNodeConnector::new(&format!("http://{addr}")).unwrap();
        let session = connector.connect().await.unwrap();
        let err = session
            .pending_nonce_at(Address::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::Connect(_)), "got {err:?}");
    }
}
