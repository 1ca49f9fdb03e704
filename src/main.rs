// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use estate_protocol::{
    api::router,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    property::DraftSweeper,
    state::AppState,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid bind address");
            std::process::exit(1);
        }
    };

    if config.wallet_provider_url.is_none() {
        warn!("No wallet provider configured; token operations will fail");
    }
    if config.contract_address.is_none() {
        warn!("No token contract address configured; contract calls will fail");
    }

    let draft_ttl = config.draft_ttl();
    let state = AppState::new(config);
    let app = router(state.clone());

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    info!(%addr, "Estate Protocol server listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    let sweeper = tokio::spawn(DraftSweeper::new(state.drafts.clone(), draft_ttl).run(shutdown.clone()));

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutting down gracefully");
                    shutdown.cancel();
                }
                Err(e) => error!(error = %e, "Failed to install CTRL+C handler"),
            }
        }
    });

    let server = axum::serve(listener, app.into_make_service()).with_graceful_shutdown({
        let shutdown = shutdown.clone();
        async move { shutdown.cancelled().await }
    });

    let result = server.await;
    shutdown.cancel();
    let _ = sweeper.await;

    if let Err(e) = result {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
