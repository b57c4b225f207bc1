use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use momo_scraper::cli::{commands, Cli};
use momo_scraper::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the payload, logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let loaded = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("{}; using default configuration", e);
        Config::default()
    });
    cli.apply(&mut config);

    let records = commands::run(config, &cli.keyword, cli.max_results).await;

    let stdout = std::io::stdout();
    commands::write_payload(&mut stdout.lock(), &records)?;

    Ok(())
}
