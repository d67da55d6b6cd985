// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use hanzi_explorer_core::{ExitCode as CliExitCode, ENV_HANZI_LOG_LEVEL};
use hanzi_explorer_server::{
    build_router, log_json_enabled, validate_startup_config, AppState, ServerConfig,
};
use hanzi_explorer_store::EntityStore;
use std::future::IntoFuture;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("unix signal handlers unavailable; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(ENV_HANZI_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json_enabled() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env()?;
    validate_startup_config(&config)?;
    let store = EntityStore::open(&config.database_path)
        .map_err(|e| format!("open store {}: {e}", config.database_path.display()))?;
    info!(
        database = %config.database_path.display(),
        audit_log = config.enable_audit_log,
        "store ready"
    );

    let bind_addr = config.bind_addr.clone();
    let drain = config.shutdown_drain;
    let app = build_router(AppState::new(store, config));
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("listen failed: {e}"))?;
    info!("hanzi-explorer-server listening on {bind_addr}");

    let stopping = Arc::new(Notify::new());
    let signal_stopping = Arc::clone(&stopping);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(drain_ms = drain.as_millis() as u64, "shutdown requested; draining");
            signal_stopping.notify_one();
        })
        .into_future();

    // In-flight requests get at most `drain` to finish once accepting stops.
    tokio::select! {
        result = server => result.map_err(|e| format!("server failed: {e}")),
        () = async {
            stopping.notified().await;
            tokio::time::sleep(drain).await;
        } => {
            warn!("drain window elapsed with requests still in flight");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(()) => {
            info!("hanzi-explorer-server stopped");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("{message}");
            ExitCode::from(CliExitCode::DependencyFailure.code())
        }
    }
}
