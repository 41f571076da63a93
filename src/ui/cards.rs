use crate::models::{
    DashboardState, ScreenerResult, ScreenerType, StockDetail, StockSummary, TrendingResponse,
};

use super::format::{group_thousands, pad_to_width, price, signed_percent};

const CARD_INNER_WIDTH: usize = 44;
const NEWS_HEADLINES_PER_CARD: usize = 2;

/// Render the whole dashboard: an optional top-level error line followed by
/// one card per screener, in the fixed screener order.
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.error {
        out.push_str(&format!("ERROR: {error}\n\n"));
    }

    for screener in ScreenerType::ALL {
        let card_text = match state.result(screener) {
            Some(ScreenerResult::Ready(payload)) => ready_card(screener, payload),
            Some(ScreenerResult::Unavailable(message)) => card(screener.label(), &[message.clone()]),
            None => card(screener.label(), &["No data yet.".to_string()]),
        };
        out.push_str(&card_text);
        out.push('\n');
    }

    out
}

pub fn render_detail(detail: &StockDetail) -> String {
    let mut lines = Vec::new();

    let ticker = detail.ticker.as_deref().unwrap_or("?");
    let name = detail.name.as_deref().unwrap_or("");
    lines.push(format!("{ticker}  {name}").trim_end().to_string());

    if let Some(value) = detail.price {
        lines.push(field("Price", &price(value)));
    }
    if let Some(value) = detail.change_percent {
        lines.push(field("Change", &signed_percent(value)));
    }
    if let Some(value) = detail.volume {
        lines.push(field("Volume", &group_thousands(value)));
    }
    if let Some(value) = &detail.market_cap {
        lines.push(field("Market cap", value));
    }
    if let Some(value) = &detail.sector {
        lines.push(field("Sector", value));
    }
    if let Some(value) = &detail.industry {
        lines.push(field("Industry", value));
    }
    if let Some(value) = &detail.pe_ratio {
        lines.push(field("P/E", value));
    }

    if !detail.news.is_empty() {
        lines.push(String::new());
        lines.push("News".to_string());
        for item in &detail.news {
            lines.push(format!("  - {} ({})", item.title, item.published_at));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn ready_card(screener: ScreenerType, payload: &TrendingResponse) -> String {
    match &payload.top_stock {
        Some(stock) => card(screener.label(), &summary_lines(stock)),
        None => card(
            screener.label(),
            &["No stock data available.".to_string()],
        ),
    }
}

fn summary_lines(stock: &StockSummary) -> Vec<String> {
    let mut lines = vec![
        format!("{}  {}", stock.ticker, stock.name),
        String::new(),
        field("Price", &price(stock.price)),
        field("Change", &signed_percent(stock.change_percent)),
        field("Volume", &group_thousands(stock.volume)),
    ];

    if let Some(value) = &stock.market_cap {
        lines.push(field("Market cap", value));
    }
    if let Some(sector) = &stock.sector {
        lines.push(field("Sector", sector));
    }
    if let Some(industry) = &stock.industry {
        lines.push(field("Industry", industry));
    }
    if let Some(value) = &stock.pe_ratio {
        lines.push(field("P/E", value));
    }

    if !stock.news.is_empty() {
        lines.push(String::new());
        for item in stock.news.iter().take(NEWS_HEADLINES_PER_CARD) {
            lines.push(format!("- {}", item.title));
        }
    }

    lines
}

fn field(label: &str, value: &str) -> String {
    format!("{label:<12}{value}")
}

fn card(title: &str, body: &[String]) -> String {
    let border = format!("+{}+\n", "-".repeat(CARD_INNER_WIDTH + 2));
    let mut out = String::new();
    out.push_str(&border);
    out.push_str(&format!("| {} |\n", pad_to_width(title, CARD_INNER_WIDTH)));
    out.push_str(&format!("|{}|\n", "-".repeat(CARD_INNER_WIDTH + 2)));
    for line in body {
        out.push_str(&format!("| {} |\n", pad_to_width(line, CARD_INNER_WIDTH)));
    }
    out.push_str(&border);
    out
}
