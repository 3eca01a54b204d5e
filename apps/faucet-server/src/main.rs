// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use clap::Parser;
use faucet_server::{
    api::router,
    config::{is_informational, verify_node, Cli, FaucetConfig, StartupError},
    state::AppState,
    telemetry::init_tracing,
};
use tokio::signal;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => {
            eprintln!("Error: {}", StartupError::from(e));
            eprintln!("Usage: faucet <CHAIN_ID> <ENDPOINT> <PRIVATE_KEY> (see --help)");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Faucet failed to start");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = FaucetConfig::from_cli(cli)?;
    let listen = config.listen;

    let issuer = config.into_issuer();
    verify_node(&issuer).await?;

    tracing::info!(
        address = %issuer.faucet_address(),
        chain_id = issuer.chain_id(),
        "Faucet account ready"
    );

    let app = router(AppState::new(issuer));

    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!("Faucet server listening on http://{listen} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C"),
        _ = terminate => tracing::info!("Received terminate signal"),
    }
}
