//! Command-line entry point: run the site or load the demo data

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogFormat, LoggingConfig};
use crate::database::surrealdb::{SurrealConfig, SurrealProtocol};
use crate::database::{seed::seed_demo_data, Database};
use crate::server::{AppState, Server};

#[derive(Parser)]
#[command(name = "oriani")]
#[command(about = "Oriani Multissoluções - site and photo gallery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Load the demo albums and photos before serving
        #[arg(long)]
        seed: bool,
    },

    /// Load the demo albums and photos
    Seed,
}

impl Cli {
    pub async fn run() -> anyhow::Result<()> {
        Self::parse().execute().await
    }

    pub async fn execute(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())
            .await
            .context("Failed to load configuration")?;

        init_tracing(&config.logging, self.verbose);
        info!("Oriani v{}", env!("CARGO_PKG_VERSION"));

        match self.command.unwrap_or(Commands::Serve { seed: false }) {
            Commands::Serve { seed } => {
                config.validate()?;
                let db = Database::connect(config.database.clone()).await?;
                if seed {
                    load_demo_data(&db).await?;
                }

                info!(
                    "Listening on {}:{}",
                    config.server.host, config.server.port
                );
                Server::new(AppState::new(config, db)?).run().await?;
            }
            Commands::Seed => {
                ensure_persistent(&config.database)?;
                let db = Database::connect(config.database.clone()).await?;
                load_demo_data(&db).await?;
            }
        }

        Ok(())
    }
}

async fn load_demo_data(db: &Database) -> anyhow::Result<()> {
    let summary = seed_demo_data(db).await?;
    info!(
        "Demo data loaded: {} albums, {} photos",
        summary.albums, summary.photos
    );
    Ok(())
}

/// A standalone seed into `mem://` would vanish when the process exits
fn ensure_persistent(database: &SurrealConfig) -> anyhow::Result<()> {
    if database.protocol()? == SurrealProtocol::Memory {
        bail!(
            "Refusing to seed the in-memory store at {}: set DATABASE_URL to a SurrealDB \
             server, or run `oriani serve --seed`",
            database.endpoint
        );
    }
    Ok(())
}

/// `RUST_LOG` wins over the configured level; `--verbose` forces debug
fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("oriani=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("oriani={0},{0}", logging.level)))
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match logging.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}
