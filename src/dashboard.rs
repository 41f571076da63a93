use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use log::warn;
use tokio::time::timeout;

use crate::api::TrendingSource;
use crate::error::{AppError, Result};
use crate::models::{DashboardState, ScreenerResult, ScreenerType};

pub const DEFAULT_REFRESH_DEADLINE: Duration = Duration::from_secs(15);

/// Drives the three screener queries concurrently, bounding each with a
/// deadline so one slow backend dependency never wedges the whole view.
pub struct Dashboard<S> {
    source: S,
    deadline: Duration,
    state: DashboardState,
}

impl<S: TrendingSource> Dashboard<S> {
    pub fn new(source: S) -> Self {
        Self::with_deadline(source, DEFAULT_REFRESH_DEADLINE)
    }

    pub fn with_deadline(source: S, deadline: Duration) -> Self {
        Self {
            source,
            deadline,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Run one refresh cycle. The per-screener result map is replaced in a
    /// single assignment once every race has settled; readers never observe
    /// a half-updated map. A refresh issued while a cycle is already in
    /// flight is ignored.
    pub async fn refresh(&mut self) {
        if self.state.loading {
            return;
        }
        self.state.loading = true;
        self.state.error = None;

        match self.run_cycle().await {
            Ok(results) => {
                self.state.results = results;
            }
            Err(err) => {
                warn!("refresh cycle failed outside the screener races: {err}");
                self.state.error = Some(format!("Failed to load stocks: {err}"));
            }
        }
        self.state.loading = false;
    }

    async fn run_cycle(&self) -> Result<HashMap<ScreenerType, ScreenerResult>> {
        let races = ScreenerType::ALL.map(|screener| self.race_screener(screener));
        let settled = join_all(races).await;

        let mut results = HashMap::with_capacity(ScreenerType::ALL.len());
        for (screener, outcome) in settled {
            results.insert(screener, outcome);
        }

        if results.len() != ScreenerType::ALL.len() {
            return Err(AppError::message(
                "refresh cycle produced an incomplete result set",
            ));
        }
        Ok(results)
    }

    /// Race one screener's fetch against the deadline. Both failure paths
    /// settle into an `Unavailable` entry; the underlying error is logged,
    /// not surfaced to the card. Dropping the future on deadline expiry also
    /// drops the in-flight connection.
    async fn race_screener(&self, screener: ScreenerType) -> (ScreenerType, ScreenerResult) {
        let result = timeout(self.deadline, self.source.fetch_trending(screener))
            .await
            .unwrap_or(Err(AppError::Timeout));

        let outcome = match result {
            Ok(payload) => ScreenerResult::Ready(payload),
            Err(err) => {
                warn!("{screener} fetch failed: {err}");
                let message = match err {
                    AppError::Timeout => timeout_message(screener),
                    _ => unavailable_message(screener),
                };
                ScreenerResult::Unavailable(message)
            }
        };
        (screener, outcome)
    }
}

fn unavailable_message(screener: ScreenerType) -> String {
    format!("{} data is currently unavailable.", screener.label())
}

fn timeout_message(screener: ScreenerType) -> String {
    format!("{} request timed out.", screener.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StockSummary, TrendingResponse};
    use std::future::Future;
    use tokio::time::sleep;

    fn success_payload(screener: ScreenerType) -> TrendingResponse {
        TrendingResponse {
            status: Some("success".to_string()),
            screener_type: Some(screener),
            top_stock: Some(StockSummary {
                ticker: "TSLA".to_string(),
                name: "Tesla, Inc.".to_string(),
                price: 182.47,
                change_percent: -2.11,
                volume: 98_331_200,
                market_cap: Some("580.1B".to_string()),
                sector: Some("Consumer Cyclical".to_string()),
                industry: Some("Auto Manufacturers".to_string()),
                pe_ratio: Some("46.05".to_string()),
                news: Vec::new(),
            }),
            error: None,
            message: None,
        }
    }

    /// most_actives answers quickly, day_gainers never settles, day_losers
    /// reports a remote failure.
    struct MixedSource;

    impl TrendingSource for MixedSource {
        fn fetch_trending(
            &self,
            screener: ScreenerType,
        ) -> impl Future<Output = crate::error::Result<TrendingResponse>> + Send {
            async move {
                match screener {
                    ScreenerType::MostActives => {
                        sleep(Duration::from_secs(1)).await;
                        Ok(success_payload(screener))
                    }
                    ScreenerType::DayGainers => {
                        futures::future::pending::<crate::error::Result<TrendingResponse>>().await
                    }
                    ScreenerType::DayLosers => {
                        sleep(Duration::from_secs(1)).await;
                        Err(AppError::Remote("rate limited".to_string()))
                    }
                }
            }
        }
    }

    struct AlwaysFails;

    impl TrendingSource for AlwaysFails {
        fn fetch_trending(
            &self,
            _screener: ScreenerType,
        ) -> impl Future<Output = crate::error::Result<TrendingResponse>> + Send {
            async {
                Err(AppError::Api {
                    status: 503,
                    detail: None,
                })
            }
        }
    }

    struct AlwaysSucceeds;

    impl TrendingSource for AlwaysSucceeds {
        fn fetch_trending(
            &self,
            screener: ScreenerType,
        ) -> impl Future<Output = crate::error::Result<TrendingResponse>> + Send {
            async move { Ok(success_payload(screener)) }
        }
    }

    struct PanicsIfCalled;

    impl TrendingSource for PanicsIfCalled {
        fn fetch_trending(
            &self,
            _screener: ScreenerType,
        ) -> impl Future<Output = crate::error::Result<TrendingResponse>> + Send {
            async { panic!("source must not be called") }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn mixed_cycle_settles_every_screener() {
        let mut dashboard = Dashboard::with_deadline(MixedSource, Duration::from_secs(15));
        dashboard.refresh().await;

        let state = dashboard.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.results.len(), 3);

        match state.result(ScreenerType::MostActives).unwrap() {
            ScreenerResult::Ready(payload) => {
                assert_eq!(payload, &success_payload(ScreenerType::MostActives));
            }
            other => panic!("expected Ready, got {other:?}"),
        }

        match state.result(ScreenerType::DayGainers).unwrap() {
            ScreenerResult::Unavailable(message) => {
                assert!(message.contains("timed out"), "{message}");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }

        match state.result(ScreenerType::DayLosers).unwrap() {
            ScreenerResult::Unavailable(message) => {
                assert!(!message.contains("timed out"), "{message}");
                assert!(message.contains("unavailable"), "{message}");
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn all_failures_clear_loading_without_top_level_error() {
        let mut dashboard = Dashboard::new(AlwaysFails);
        dashboard.refresh().await;

        let state = dashboard.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.results.len(), 3);
        assert!(state
            .results
            .values()
            .all(|result| !result.is_ready()));
    }

    #[tokio::test(start_paused = true)]
    async fn successful_payloads_land_verbatim() {
        let mut dashboard = Dashboard::new(AlwaysSucceeds);
        dashboard.refresh().await;

        for screener in ScreenerType::ALL {
            match dashboard.state().result(screener).unwrap() {
                ScreenerResult::Ready(payload) => {
                    assert_eq!(payload, &success_payload(screener));
                }
                other => panic!("expected Ready for {screener}, got {other:?}"),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_is_ignored_while_a_cycle_is_in_flight() {
        let mut dashboard = Dashboard::new(PanicsIfCalled);
        dashboard.state.loading = true;

        dashboard.refresh().await;

        assert!(dashboard.state().loading);
        assert!(dashboard.state().results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_cycle_replaces_the_map_wholesale() {
        let mut dashboard = Dashboard::new(AlwaysSucceeds);
        dashboard.refresh().await;
        let first = dashboard.state().results.clone();

        dashboard.refresh().await;
        assert_eq!(dashboard.state().results, first);
        assert_eq!(dashboard.state().results.len(), 3);
    }
}
