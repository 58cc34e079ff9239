//! Yahoo Finance chart endpoint.
//!
//! The decoder is kept separate from the HTTP call so it can be tested
//! against canned response bodies.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::MARKET;
use crate::data::market_data::MarketDataSource;
use crate::domain::{Interval, PriceBar, PriceSeries, SeriesRange, SeriesRequest};
use crate::errors::PipelineError;
use crate::utils::time_utils::{date_to_epoch_sec, epoch_sec_to_utc};

pub(crate) const YAHOO_SIGNATURE: &str = "Yahoo Finance";

/// Shared client for every Yahoo endpoint: timeouts and a browser user agent.
pub(crate) fn yahoo_client() -> Result<Client, PipelineError> {
    Client::builder()
        .timeout(Duration::from_millis(MARKET.client.timeout_ms))
        .connect_timeout(Duration::from_millis(MARKET.client.connect_timeout_ms))
        .user_agent(MARKET.yahoo.user_agent)
        .build()
        .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, e))
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: Option<String>,
}

fn value_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Decodes a v8 chart body into a validated series.
///
/// Rows without a close are skipped. Rows missing any of open/high/low are kept
/// as close-only bars. A repeated timestamp (Yahoo re-sends the live bar)
/// keeps the later row.
pub fn series_from_chart_response(
    symbol: &str,
    interval: Interval,
    body: &str,
) -> Result<PriceSeries, PipelineError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, format!("bad chart body: {}", e)))?;

    if let Some(error) = envelope.chart.error {
        let detail = error.description.unwrap_or_default();
        if error.code == "Not Found" {
            log::info!("Yahoo has no chart for {}: {}", symbol, detail);
            return Err(PipelineError::empty_series(symbol));
        }
        return Err(PipelineError::upstream(
            YAHOO_SIGNATURE,
            format!("{} - {}", error.code, detail),
        ));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(PipelineError::empty_series(symbol));
    };
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<PriceBar> = Vec::with_capacity(timestamps.len());
    for (i, epoch_sec) in timestamps.into_iter().enumerate() {
        let (Some(timestamp), Some(close)) = (epoch_sec_to_utc(epoch_sec), value_at(&quote.close, i))
        else {
            continue;
        };
        let volume = value_at(&quote.volume, i);
        let bar = match (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
        ) {
            (Some(open), Some(high), Some(low)) => {
                PriceBar::new(timestamp, open, high, low, close, volume)
            }
            _ => PriceBar {
                volume,
                ..PriceBar::close_only(timestamp, close)
            },
        };

        match bars.last_mut() {
            Some(last) if last.timestamp == bar.timestamp => *last = bar,
            Some(last) if last.timestamp > bar.timestamp => {
                log::warn!("Dropping out-of-order {} bar at {}", symbol, bar.timestamp);
            }
            _ => bars.push(bar),
        }
    }

    if bars.is_empty() {
        return Err(PipelineError::empty_series(symbol));
    }
    PriceSeries::new(symbol, interval, bars)
}

/// Query pairs for a request: `range` for look-back periods, `period1/period2` for dates.
fn chart_query(request: &SeriesRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![("interval", request.interval.to_string())];
    match request.range {
        SeriesRange::Period(period) => query.push(("range", period.to_string())),
        SeriesRange::Dates { start, end } => {
            query.push(("period1", date_to_epoch_sec(start).to_string()));
            query.push(("period2", date_to_epoch_sec(end).to_string()));
        }
    }
    query
}

pub struct YahooChartSource {
    client: Client,
    base_url: String,
}

impl YahooChartSource {
    pub fn new() -> Result<Self, PipelineError> {
        Ok(Self {
            client: yahoo_client()?,
            base_url: MARKET.yahoo.base_url.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataSource for YahooChartSource {
    fn signature(&self) -> &'static str {
        YAHOO_SIGNATURE
    }

    async fn fetch_series(&self, request: &SeriesRequest) -> Result<PriceSeries, PipelineError> {
        let url = format!(
            "{}{}{}",
            self.base_url, MARKET.yahoo.chart_path, request.symbol
        );
        let response = self
            .client
            .get(&url)
            .query(&chart_query(request))
            .send()
            .await
            .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, e))?;

        // Unknown symbols come back as 404 with a JSON error body, so decode before checking status.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::upstream(YAHOO_SIGNATURE, e))?;

        match series_from_chart_response(&request.symbol, request.interval, &body) {
            Err(PipelineError::UpstreamFailure { message, .. }) if !status.is_success() => Err(
                PipelineError::upstream(YAHOO_SIGNATURE, format!("HTTP {}: {}", status, message)),
            ),
            other => other,
        }
    }
}
