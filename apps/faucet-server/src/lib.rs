// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Faucet Server - single-account native token faucet
//!
//! Signs fixed-value transfers from one faucet account and relays them
//! through a remote JSON-RPC node.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Signing identity, transfer building, node client, issuer
//! - `config` - Command line and startup validation
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod state;
pub mod telemetry;
