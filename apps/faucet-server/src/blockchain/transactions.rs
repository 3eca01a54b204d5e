// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction building for faucet transfers.
//!
//! Transfers are legacy (untyped) transactions. The chain identifier is bound
//! at signing time, which turns them into EIP-155 replay-protected payloads.

use alloy::{
    consensus::{SignableTransaction, Signed, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    primitives::{Address, Bytes, Signature, TxKind, B256, U256},
};

use super::types::TransferPolicy;

/// A transfer that has not been signed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransfer {
    /// Sender nonce, as reported by the node
    pub nonce: u64,
    /// Recipient account
    pub recipient: Address,
    /// Value in kei
    pub amount: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Gas price in kei
    pub gas_price: u128,
    /// Call data (always empty for faucet grants)
    pub payload: Bytes,
}

impl UnsignedTransfer {
    /// The legacy transaction this transfer signs as on `chain_id`.
    pub fn to_legacy(&self, chain_id: u64) -> TxLegacy {
        TxLegacy {
            chain_id: Some(chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            to: TxKind::Call(self.recipient),
            value: self.amount,
            input: self.payload.clone(),
        }
    }

    /// Hash the signer commits to on `chain_id`.
    pub fn signature_hash(&self, chain_id: u64) -> B256 {
        self.to_legacy(chain_id).signature_hash()
    }
}

/// A transfer carrying exactly one signature, ready for broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransfer {
    inner: Signed<TxLegacy>,
}

impl SignedTransfer {
    pub(crate) fn new(tx: TxLegacy, signature: Signature) -> Self {
        Self {
            inner: tx.into_signed(signature),
        }
    }

    /// Transaction hash (keccak256 of the encoded signed transaction).
    pub fn hash(&self) -> B256 {
        *self.inner.hash()
    }

    pub fn nonce(&self) -> u64 {
        self.inner.tx().nonce
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.inner.tx().chain_id
    }

    pub fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    pub fn transaction(&self) -> &TxLegacy {
        self.inner.tx()
    }

    /// Raw bytes for `eth_sendRawTransaction`.
    pub fn encoded(&self) -> Vec<u8> {
        TxEnvelope::Legacy(self.inner.clone()).encoded_2718()
    }
}

/// Build an unsigned transfer. Pure and infallible.
pub fn build_transfer(
    nonce: u64,
    recipient: Address,
    amount: U256,
    gas_limit: u64,
    gas_price: u128,
) -> UnsignedTransfer {
    UnsignedTransfer {
        nonce,
        recipient,
        amount,
        gas_limit,
        gas_price,
        payload: Bytes::new(),
    }
}

/// Build the faucet grant for `recipient` under `policy`.
pub fn build_grant(nonce: u64, recipient: Address, policy: &TransferPolicy) -> UnsignedTransfer {
    build_transfer(
        nonce,
        recipient,
        policy.amount,
        policy.gas_limit,
        policy.gas_price,
    )
}
