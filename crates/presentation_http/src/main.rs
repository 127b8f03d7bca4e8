//! EmailCraft HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{EmailDeliveryService, EmailDraftService, GenerationPort, MailTransportPort};
use infrastructure::{AppConfig, ProviderGenerationAdapter, SmtpMailAdapter, init_logging};
use presentation_http::{AppState, create_app, set_expose_internal_errors};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    init_logging(config.server.json_logs())?;

    info!("EmailCraft v{} starting...", env!("CARGO_PKG_VERSION"));
    config.log_summary();
    for warning in config.startup_warnings() {
        warn!("{warning}");
    }

    set_expose_internal_errors(config.environment.exposes_error_details());

    let generator: Arc<dyn GenerationPort> = Arc::new(
        ProviderGenerationAdapter::from_config(config.provider.clone(), config.retry.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize provider client: {e}"))?,
    );
    let transport: Arc<dyn MailTransportPort> =
        Arc::new(SmtpMailAdapter::new(config.smtp.clone()));

    let state = AppState::new(
        EmailDraftService::new(generator),
        EmailDeliveryService::new(transport),
    );

    let app = create_app(state, config.server.max_body_size_json_bytes);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");
    info!("OpenAPI document: http://{addr}/api-docs/openapi.json");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
///
/// In-flight requests keep running; a second signal is not needed.
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    // Hard stop if draining stalls
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        warn!(?timeout, "Connections still open after shutdown timeout, exiting");
        std::process::exit(1);
    });

    info!("Waiting up to {timeout:?} for connections to close...");
}
