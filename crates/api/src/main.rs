//! User API - entry point.
//!
//! CLI-based entry point that dispatches to the serve, migrate and token
//! commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_lib::cli::{Cli, Commands};
use api_lib::config::ApiConfig;
use api_lib::token::TokenKeys;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ApiConfig::from_env();

    // Initialize tracing (verbose mode sets debug level)
    let log_level = config
        .as_ref()
        .map(|c| c.service.log_level.as_str())
        .unwrap_or("info");
    init_tracing(cli.verbose, log_level);

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.service.host = host;
            }
            if let Some(port) = args.port {
                config.service.port = port;
            }
            if let Some(storage) = args.storage {
                config.storage = storage;
            }
            api_lib::run_server(config).await
        }
        Commands::Migrate(args) => {
            user_service_lib::run_migrations(args.action.into(), &config.database)
                .await
                .map_err(Into::into)
        }
        Commands::Token(args) => TokenKeys::from_config(&config.auth)
            .issue(&args.subject, args.role)
            .map(|token| println!("{}", token))
            .map_err(Into::into),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose { "debug" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
