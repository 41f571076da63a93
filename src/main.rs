mod cli;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use trending_dashboard::api::ApiClient;
use trending_dashboard::config::Config;
use trending_dashboard::dashboard::Dashboard;
use trending_dashboard::ui;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config).context("Failed to load configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => run_dashboard(&config).await,
        Commands::Stock { ref ticker } => show_stock(&config, ticker).await,
    }
}

async fn run_dashboard(config: &Config) -> Result<()> {
    println!(
        "Trending stocks as of {}",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    println!();

    let client = ApiClient::new(config);
    let mut dashboard = Dashboard::with_deadline(client, config.request_timeout());
    dashboard.refresh().await;

    print!("{}", ui::render_dashboard(dashboard.state()));
    Ok(())
}

async fn show_stock(config: &Config, ticker: &str) -> Result<()> {
    let client = ApiClient::new(config);
    let detail = client
        .fetch_stock_detail(ticker)
        .await
        .with_context(|| format!("Failed to fetch detail for {ticker}"))?;

    print!("{}", ui::render_detail(&detail));
    Ok(())
}
