// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Faucet endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{blockchain::FaucetInfo, error::ApiError, state::AppState};

/// Successful grant.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FaucetResponse {
    /// Hash of the submitted transfer
    pub tx_hash: String,
}

/// Send the fixed grant to `address`.
#[utoipa::path(
    get,
    path = "/faucet/{address}",
    tag = "Faucet",
    params(("address" = String, Path, description = "Recipient address (0x + 40 hex chars)")),
    responses(
        (status = 200, description = "Transfer submitted", body = FaucetResponse),
        (status = 400, description = "Malformed address", body = crate::error::ErrorBody),
        (status = 500, description = "Node, signing or broadcast failure", body = crate::error::ErrorBody)
    )
)]
pub async fn request_funds(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<FaucetResponse>, ApiError> {
    let tx_hash = state.issuer.issue(&address).await?;

    Ok(Json(FaucetResponse {
        tx_hash: format!("{:?}", tx_hash),
    }))
}

/// Faucet account, chain and grant policy.
#[utoipa::path(
    get,
    path = "/info",
    tag = "Faucet",
    responses((status = 200, description = "Faucet description", body = FaucetInfo))
)]
pub async fn faucet_info(State(state): State<AppState>) -> Json<FaucetInfo> {
    Json(state.issuer.info())
}
