use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLC(V) sample. `close` is always present; providers that only supply
/// closes leave `open`/`high`/`low` empty and the bar charts as a line point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

impl PriceBar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        PriceBar {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
            volume,
        }
    }

    pub fn close_only(timestamp: DateTime<Utc>, close: f64) -> Self {
        PriceBar {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// (open, high, low, close) when the full candle is populated.
    pub fn ohlc(&self) -> Option<(f64, f64, f64, f64)> {
        Some((self.open?, self.high?, self.low?, self.close))
    }

    pub fn get_type(&self) -> CandleType {
        match self.open {
            Some(open) if self.close < open => CandleType::Bearish,
            _ => CandleType::Bullish,
        }
    }

    // Low and high of the candle body. Close-only bars have a zero-height body.
    pub fn body_range(&self) -> (f64, f64) {
        let open = self.open.unwrap_or(self.close);
        match self.get_type() {
            CandleType::Bullish => (open, self.close),
            CandleType::Bearish => (self.close, open),
        }
    }

    /// Lowest and highest traded price, falling back to the body.
    pub fn price_extent(&self) -> (f64, f64) {
        let (body_low, body_high) = self.body_range();
        (
            self.low.unwrap_or(body_low),
            self.high.unwrap_or(body_high),
        )
    }
}
