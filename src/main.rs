//! Trade ledger service - main entry point

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use trade_ledger::config::LedgerConfig;
use trade_ledger::server::{self, TradeLedgerServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trade_ledger=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let matches = Command::new("trade-ledger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trade recording service with lifecycle tracking and per-ticker analytics")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("ledger.toml"),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Print routes if requested
    if matches.get_flag("routes") {
        server::print_routes();
        return Ok(());
    }

    // Load configuration
    let default_config = "ledger.toml".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let config = match LedgerConfig::from_file(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(load_error) => {
            error!("Failed to load config from {}: {}", config_path, load_error);
            info!("Using default configuration");
            LedgerConfig::default()
        }
    };

    // Print startup information
    info!("Starting trade ledger v{}", env!("CARGO_PKG_VERSION"));
    info!("Server will bind to: {}", config.server_address());
    info!("Database: {}", config.database.url);
    info!("CORS enabled: {}", config.cors.enabled);

    // Start the server
    let ledger_server = TradeLedgerServer::new(config).await?;
    if let Err(serve_error) = ledger_server.start().await {
        error!("Server error: {}", serve_error);
        std::process::exit(1);
    }

    Ok(())
}
