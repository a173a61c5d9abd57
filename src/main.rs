//! Phonebook - in-memory phonebook REST API

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phonebook::api::{self, AppState};
use phonebook::config::Config;
use phonebook::store::PersonStore;

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "In-memory phonebook REST API")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("phonebook={}", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let store = PersonStore::with_persons(config.initial_persons()?)?;
            if store.is_empty().await {
                tracing::warn!("Starting with an empty phonebook");
            } else {
                tracing::info!("Loaded {} entries", store.len().await);
            }

            let router = api::create_router(AppState::from_config(store, &config));
            let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

            tracing::info!("Server running on port {}", config.port);
            axum::serve(listener, router).await?;
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
