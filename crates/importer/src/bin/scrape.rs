use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use importer::{HttpPageSource, Loader, RaceConfig, RunOptions};
use storage::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scrape")]
#[command(about = "Cross-country results scraper", long_about = None)]
#[command(version)]
struct Cli {
    /// Race configuration file.
    #[arg(long, env = "CONFIG_PATH", default_value = "config/races.yaml")]
    config: PathBuf,

    /// Delete all existing data before loading. Destructive.
    #[arg(long)]
    clear_db: bool,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Per-request timeout for result page fetches.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Pause between two network fetches.
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("scrape={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loading race configuration from: {}", cli.config.display());
    let config = RaceConfig::load(&cli.config).await?;
    if config.is_empty() {
        tracing::warn!("No races configured in {}", cli.config.display());
        return Ok(ExitCode::SUCCESS);
    }
    tracing::info!("{} race(s) configured", config.len());

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    let pages = HttpPageSource::new(Duration::from_secs(cli.timeout_secs))?;
    let options = RunOptions {
        clear_db: cli.clear_db,
        fetch_delay: Duration::from_millis(cli.delay_ms),
    };

    let loader = Loader::new(db.store(), pages, options);
    let summary = loader.run(&config).await?;

    summary.log();
    println!("{}", summary);

    if summary.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
