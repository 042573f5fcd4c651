//! `finance-api` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve` — start the HTTP API.
//! - `check` — verify the database is reachable and exit.

use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use db::PgStore;

#[derive(Parser)]
#[command(
    name = "finance-api",
    about = "HTTP API over the household finance stored procedures",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    /// Pool ceiling.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    max_connections: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Connect to the database, run `SELECT 1`, and exit.
    Check {
        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { bind, database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;
            info!("Starting API server on {bind}");
            api::serve(&bind, Arc::new(PgStore::new(pool)))
                .await
                .with_context(|| format!("server on {bind} failed"))?;
        }
        Command::Check { database } => {
            let pool = db::pool::create_pool(&database.database_url, database.max_connections)
                .await
                .context("failed to connect to database")?;
            db::pool::ping(&pool).await.context("database did not answer")?;
            info!("Database is reachable");
        }
    }

    Ok(())
}
