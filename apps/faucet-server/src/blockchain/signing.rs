// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Faucet signing identity.
//!
//! The identity is built once at startup from a hex-encoded secp256k1 key and
//! is immutable afterwards. Signatures follow RFC 6979, so signing the same
//! transfer twice produces identical bytes.

use std::fmt;

use alloy::{
    primitives::Address,
    signers::{local::PrivateKeySigner, SignerSync},
};
use k256::{ecdsa::SigningKey, SecretKey};

use super::transactions::{SignedTransfer, UnsignedTransfer};

/// Key material could not be turned into a signer.
///
/// The message never echoes any part of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("private key must be 64 hex characters")]
    InvalidEncoding,

    #[error("private key is not a valid secp256k1 scalar")]
    InvalidScalar,
}

/// Signing produced no signature.
#[derive(Debug, thiserror::Error)]
#[error("signing failed: {0}")]
pub struct SigningError(String);

/// The faucet account: private key plus derived address.
pub struct SignerIdentity {
    signer: PrivateKeySigner,
}

impl SignerIdentity {
    /// Build an identity from a hex private key (64 digits, optional `0x`).
    pub fn from_hex(private_key_hex: &str) -> Result<Self, KeyError> {
        let trimmed = private_key_hex.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if digits.len() != 64 {
            return Err(KeyError::InvalidEncoding);
        }
        let key_bytes = alloy::hex::decode(digits).map_err(|_| KeyError::InvalidEncoding)?;

        let secret = SecretKey::from_slice(&key_bytes).map_err(|_| KeyError::InvalidScalar)?;
        let signer = PrivateKeySigner::from_signing_key(SigningKey::from(secret));

        Ok(Self { signer })
    }

    /// Account address derived from the public key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign `transfer` for `chain_id` (EIP-155).
    pub fn sign(
        &self,
        transfer: &UnsignedTransfer,
        chain_id: u64,
    ) -> Result<SignedTransfer, SigningError> {
        let tx = transfer.to_legacy(chain_id);
        let signature = self
            .signer
            .sign_hash_sync(&transfer.signature_hash(chain_id))
            .map_err(|e| SigningError(e.to_string()))?;

        Ok(SignedTransfer::new(tx, signature))
    }
}

impl fmt::Debug for SignerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerIdentity")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
