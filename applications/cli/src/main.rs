//! Cadence - session state from the command line
use cadence_cli::{execute, AppConfig, Command, DirectoryScanner};
use cadence_session::SessionEngine;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Cadence audio player session manager", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database file
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cadence=info,cadence_cli=info,cadence_session=info,cadence_storage=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    tracing::info!("Using database {}", config.database_path.display());

    let store = cadence_storage::open(&config.database_path).await?;
    let mut engine = SessionEngine::start(Arc::new(store), config.session).await;

    let result = execute(&mut engine, &DirectoryScanner::new(), cli.command).await;

    engine.flush().await;
    for failure in engine.drain_persist_failures() {
        tracing::warn!("Unsaved {}: {}", failure.target, failure.message);
    }
    if let Some(toast) = engine.toast() {
        eprintln!("{}", toast.message);
    }
    engine.shutdown().await;

    for line in result? {
        println!("{line}");
    }

    Ok(())
}
