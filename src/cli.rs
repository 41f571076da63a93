use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trending-dashboard")]
#[command(about = "Terminal dashboard for trending stocks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Override the backend base URL from the config file
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Per-screener deadline in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the three trending screeners and render summary cards (default)
    Dashboard,

    /// Look up detail for a single ticker
    Stock {
        /// Ticker symbol (e.g. AAPL)
        ticker: String,
    },
}
