//! Alpha Vantage quote source
//!
//! Fetches the `TIME_SERIES_MONTHLY_ADJUSTED` endpoint and extracts the
//! adjusted-close series, newest-first. Free tier is limited to 5 API
//! calls per minute.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{QuoteError, QuoteSource};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// TIME_SERIES_MONTHLY_ADJUSTED response
#[derive(Debug, Deserialize)]
struct MonthlyAdjustedResponse {
    #[serde(rename = "Monthly Adjusted Time Series")]
    time_series: Option<HashMap<String, MonthlyBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MonthlyBar {
    #[serde(rename = "5. adjusted close")]
    adjusted_close: String,
}

/// Blocking Alpha Vantage client.
///
/// One HTTP GET per lookup; the call blocks the caller for up to the
/// 30-second client timeout. No retry and no caching.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    /// Create a client with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Extract the adjusted-close series from a response body,
    /// ordered newest-first by date key.
    fn parse_monthly_series(body: &str) -> Result<Vec<f64>, QuoteError> {
        let response: MonthlyAdjustedResponse = serde_json::from_str(body)
            .map_err(|e| QuoteError::MalformedPayload(e.to_string()))?;

        if let Some(msg) = response.error_message {
            return Err(QuoteError::MalformedPayload(msg));
        }
        // "Note" and "Information" usually indicate rate limiting on the
        // free tier; the series is absent in that case
        if let Some(msg) = response.note.or(response.information) {
            warn!("Alpha Vantage note: {}", msg);
        }

        let series = response
            .time_series
            .ok_or_else(|| QuoteError::MalformedPayload("missing monthly time series".into()))?;

        let mut dated: Vec<(NaiveDate, f64)> = Vec::with_capacity(series.len());
        for (date_str, bar) in &series {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
                QuoteError::MalformedPayload(format!("bad date key: {}", date_str))
            })?;
            let close: f64 = bar.adjusted_close.parse().map_err(|_| {
                QuoteError::MalformedPayload(format!(
                    "bad adjusted close for {}: {}",
                    date_str, bar.adjusted_close
                ))
            })?;
            dated.push((date, close));
        }

        // Newest first
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        if dated.len() < 2 {
            return Err(QuoteError::ShortSeries(dated.len()));
        }

        Ok(dated.into_iter().map(|(_, close)| close).collect())
    }
}

impl QuoteSource for AlphaVantageClient {
    fn monthly_adjusted_closes(&self, symbol: &str) -> Result<Vec<f64>, QuoteError> {
        let params = [
            ("function", "TIME_SERIES_MONTHLY_ADJUSTED"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];
        let url = reqwest::Url::parse_with_params(BASE_URL, &params)
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        Self::parse_monthly_series(&body)
    }
}
