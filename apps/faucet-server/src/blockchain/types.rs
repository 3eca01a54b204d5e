// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use std::str::FromStr;

use alloy::primitives::{Address, U256};
use serde::Serialize;
use utoipa::ToSchema;

/// One KAIA expressed in kei (the chain's smallest unit).
pub const KAIA: u128 = 1_000_000_000_000_000_000;

/// One ston (gas price unit) expressed in kei.
pub const STON: u128 = 1_000_000_000;

/// Length of a `0x`-prefixed hex account address.
pub const ADDRESS_HEX_LEN: usize = 42;

/// Fixed parameters of every transfer the faucet sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPolicy {
    /// Value granted per request, in kei
    pub amount: U256,
    /// Gas limit of the transfer
    pub gas_limit: u64,
    /// Gas price, in kei
    pub gas_price: u128,
}

/// Faucet grant: 5 KAIA, 50 000 gas at 25 ston.
pub const FAUCET_POLICY: TransferPolicy = TransferPolicy {
    amount: U256::from_limbs([5_000_000_000_000_000_000, 0, 0, 0]),
    gas_limit: 50_000,
    gas_price: 25 * STON,
};

/// Reasons a recipient string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address format")]
    InvalidLength,

    #[error("invalid address: must start with 0x")]
    MissingPrefix,

    #[error("invalid address: must contain only hex characters")]
    InvalidHex,
}

/// Parse a `0x` + 40 hex digit account address.
///
/// Mixed-case input is accepted without enforcing the EIP-55 checksum.
pub fn parse_address(raw: &str) -> Result<Address, AddressError> {
    if raw.len() != ADDRESS_HEX_LEN {
        return Err(AddressError::InvalidLength);
    }
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or(AddressError::MissingPrefix)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidHex);
    }
    Address::from_str(digits).map_err(|_| AddressError::InvalidHex)
}

/// Public description of the faucet, served by the info endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaucetInfo {
    /// Faucet account address
    pub address: String,
    /// Chain identifier bound into every signature
    pub chain_id: u64,
    /// Grant per request, in kei
    pub amount: String,
    /// Gas limit per transfer
    pub gas_limit: u64,
    /// Gas price, in kei
    pub gas_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_matches_grant_constants() {
        assert_eq!(FAUCET_POLICY.amount, U256::from(5 * KAIA));
        assert_eq!(FAUCET_POLICY.gas_price, 25 * STON);
        assert_eq!(FAUCET_POLICY.gas_limit, 50_000);
        assert_eq!(FAUCET_POLICY.gas_price, 25_000_000_000);
    }

    #[test]
    fn parse_address_accepts_valid_forms() {
        let lower = parse_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
        let upper = parse_address("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, Address::repeat_byte(0xaa));
    }

    #[test]
    fn parse_address_rejects_wrong_length() {
        assert_eq!(
            parse_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Err(AddressError::InvalidLength)
        );
        assert_eq!(
            parse_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Err(AddressError::InvalidLength)
        );
        assert_eq!(parse_address(""), Err(AddressError::InvalidLength));
    }

    #[test]
    fn parse_address_rejects_bad_characters() {
        assert_eq!(
            parse_address("0xgaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Err(AddressError::InvalidHex)
        );
        assert_eq!(
            parse_address("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            Err(AddressError::MissingPrefix)
        );
    }
}
