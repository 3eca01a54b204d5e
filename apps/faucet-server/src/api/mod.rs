// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    blockchain::FaucetInfo,
    error::ErrorBody,
    state::AppState,
};

pub mod faucet;
pub mod health;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/faucet/{address}", get(faucet::request_funds))
        .route("/info", get(faucet::faucet_info))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        faucet::request_funds,
        faucet::faucet_info,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            faucet::FaucetResponse,
            FaucetInfo,
            ErrorBody,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Faucet", description = "Native token grants"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_faucet_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/faucet/{address}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
