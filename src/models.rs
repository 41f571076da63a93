use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The three screener categories served by the backend. Closed set; anything
/// else is rejected before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenerType {
    MostActives,
    DayGainers,
    DayLosers,
}

impl ScreenerType {
    pub const ALL: [ScreenerType; 3] = [
        ScreenerType::MostActives,
        ScreenerType::DayGainers,
        ScreenerType::DayLosers,
    ];

    /// Wire name used as the `screener_type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenerType::MostActives => "most_actives",
            ScreenerType::DayGainers => "day_gainers",
            ScreenerType::DayLosers => "day_losers",
        }
    }

    /// Human label for card headers.
    pub fn label(&self) -> &'static str {
        match self {
            ScreenerType::MostActives => "Most Actives",
            ScreenerType::DayGainers => "Day Gainers",
            ScreenerType::DayLosers => "Day Losers",
        }
    }
}

impl fmt::Display for ScreenerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenerType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "most_actives" => Ok(ScreenerType::MostActives),
            "day_gainers" => Ok(ScreenerType::DayGainers),
            "day_losers" => Ok(ScreenerType::DayLosers),
            other => Err(AppError::invalid_argument(format!(
                "unknown screener type: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub related_tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Snapshot of the top-ranked stock for one screener, as returned by the
/// backend. Never mutated after decoding.
pub struct StockSummary {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: u64,
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub pe_ratio: Option<String>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

/// Envelope of `GET /stocks/trending`. All fields optional so the envelope
/// always decodes; validation of `status` happens in the API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub screener_type: Option<ScreenerType>,
    #[serde(default)]
    pub top_stock: Option<StockSummary>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope of `GET /stocks/{TICKER}`: the stock fields arrive flattened
/// next to `status` rather than nested under a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(default)]
    pub market_cap: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub pe_ratio: Option<String>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Final outcome of one screener's fetch cycle: either the full payload or a
/// user-facing failure message. Never a partial record.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenerResult {
    Ready(TrendingResponse),
    Unavailable(String),
}

impl ScreenerResult {
    pub fn is_ready(&self) -> bool {
        matches!(self, ScreenerResult::Ready(_))
    }
}

/// Aggregated view the presentation layer reads. Replaced wholesale at the
/// end of each refresh cycle.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub results: HashMap<ScreenerType, ScreenerResult>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    pub fn result(&self, screener: ScreenerType) -> Option<&ScreenerResult> {
        self.results.get(&screener)
    }
}
