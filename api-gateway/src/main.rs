//! API Gateway for the transfer service

use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig};
use api_gateway::config::AppConfig;
use api_gateway::{app, AppState};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Transfer service API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address, defaults to 127.0.0.1:$PORT
    #[clap(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();
    let config = AppConfig::new();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let log_level = if config.debug { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug,account_service=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Initialize services
    let service_config = AccountServiceConfig::from_env();
    info!(
        "Starting account service with lock timeout {:?}, notification timeout {:?}, transaction logging: {}",
        service_config.lock_timeout, service_config.notification_timeout, service_config.transaction_logging
    );
    let account_service = Arc::new(AccountService::with_config(service_config));
    let state = AppState::new(account_service);

    // Start the server
    let addr: std::net::SocketAddr = args.addr.unwrap_or_else(|| config.listen_addr()).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app(state, log_level))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Error waiting for Ctrl+C: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
