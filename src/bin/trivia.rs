use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file, values from TRIVIA_* variables take precedence
    #[clap(long, default_value = "trivia.toml")]
    config: PathBuf,
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Serve the HTTP API
    Serve,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config).context("Failed to load settings")?;
    let pool = db::establish_connection(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("Cannot connect to DB")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            tracing::info!("Running db migrations...");
            db::run_migrations(&pool).await?;
        }
        Commands::Serve => {
            if settings.database.run_migrations {
                tracing::info!("Running db migrations...");
                db::run_migrations(&pool).await?;
            }
            run_server(pool, &settings.application).await?;
        }
    }
    Ok(())
}
