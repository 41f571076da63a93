use std::future::Future;

use log::warn;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ScreenerType, StockDetail, TrendingResponse};

/// Seam between the orchestrator and the network layer. The dashboard only
/// needs the trending call, so test doubles implement just that.
pub trait TrendingSource {
    fn fetch_trending(
        &self,
        screener: ScreenerType,
    ) -> impl Future<Output = Result<TrendingResponse>> + Send;
}

/// Thin client over the two backend endpoints. One outbound call per
/// invocation; no retries, no caching. Every failure is logged and
/// re-signalled to the caller.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            client: Client::new(),
        }
    }

    /// `GET {base}/stocks/trending?screener_type=...`. Invalid screener tags
    /// are unrepresentable in `ScreenerType`; string input is rejected when
    /// parsed, before any request is built.
    pub async fn fetch_trending(&self, screener: ScreenerType) -> Result<TrendingResponse> {
        let url = format!("{}/stocks/trending", self.base_url);
        let result = async {
            let response = self
                .client
                .get(&url)
                .query(&[("screener_type", screener.as_str())])
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await?;
            decode_envelope::<TrendingResponse>(response).await
        }
        .await;

        if let Err(err) = &result {
            warn!("trending request for {screener} failed: {err}");
        }
        result
    }

    /// `GET {base}/stocks/{TICKER}`. The ticker is trimmed and upper-cased;
    /// blank input fails before any network I/O.
    pub async fn fetch_stock_detail(&self, ticker: &str) -> Result<StockDetail> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(AppError::invalid_argument(
                "ticker must be a non-empty string",
            ));
        }

        let url = format!("{}/stocks/{}", self.base_url, ticker);
        let result = async {
            let response = self
                .client
                .get(&url)
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await?;
            decode_envelope::<StockDetail>(response).await
        }
        .await;

        if let Err(err) = &result {
            warn!("detail request for {ticker} failed: {err}");
        }
        result
    }
}

impl TrendingSource for ApiClient {
    fn fetch_trending(
        &self,
        screener: ScreenerType,
    ) -> impl Future<Output = Result<TrendingResponse>> + Send {
        self.fetch_trending(screener)
    }
}

/// Response envelopes carry their own status discriminator; validation is
/// shared across both endpoints.
trait Envelope {
    fn status(&self) -> Option<&str>;
    fn remote_error(&self) -> Option<&str>;
}

impl Envelope for TrendingResponse {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn remote_error(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

impl Envelope for StockDetail {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // The detail endpoint reports failures under `error` first.
    fn remote_error(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

async fn decode_envelope<T>(response: Response) -> Result<T>
where
    T: Envelope + DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        // Best-effort read of the FastAPI-style `detail` field.
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("detail")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            });
        return Err(AppError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response.text().await?;
    let envelope: T = serde_json::from_str(&body)
        .map_err(|err| AppError::MalformedResponse(format!("undecodable body: {err}")))?;

    match envelope.status() {
        None => Err(AppError::MalformedResponse(
            "missing status field".to_string(),
        )),
        Some("error") => Err(AppError::Remote(
            envelope.remote_error().unwrap_or("Unknown error").to_string(),
        )),
        Some(_) => Ok(envelope),
    }
}
