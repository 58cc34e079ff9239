use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::market::Interval;
use crate::domain::price_bar::PriceBar;
use crate::errors::PipelineError;

/// Time-ordered bars for one symbol over one interval.
///
/// Timestamps are strictly increasing. An empty series is a legal value here;
/// the pipeline rejects it before computing levels or building a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    interval: Interval,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(
        symbol: impl Into<String>,
        interval: Interval,
        bars: Vec<PriceBar>,
    ) -> Result<Self, PipelineError> {
        let symbol = symbol.into();

        if let Some((prev, next)) = bars
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.timestamp >= b.timestamp)
        {
            return Err(PipelineError::invalid(format!(
                "{} bars out of order: {} is not before {}",
                symbol, prev.timestamp, next.timestamp
            )));
        }

        if let Some(bar) = bars.iter().find(|bar| !bar.close.is_finite()) {
            return Err(PipelineError::invalid(format!(
                "{} has a non-finite close at {}",
                symbol, bar.timestamp
            )));
        }

        Ok(Self {
            symbol,
            interval,
            bars,
        })
    }

    pub fn empty(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|bar| bar.close)
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.first().map(|bar| bar.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(|bar| bar.timestamp)
    }

    /// True when every bar carries a full OHLC candle.
    pub fn has_full_ohlc(&self) -> bool {
        !self.bars.is_empty() && self.bars.iter().all(|bar| bar.ohlc().is_some())
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Lowest low and highest high across the series.
    pub fn price_extent(&self) -> Option<(f64, f64)> {
        self.bars
            .iter()
            .map(PriceBar::price_extent)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn bar_at(minutes: i64, close: f64) -> PriceBar {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap() + Duration::minutes(minutes);
        PriceBar::new(ts, close - 0.5, close + 1.0, close - 1.0, close, None)
    }

    #[test]
    fn accepts_strictly_increasing_bars() {
        let series = PriceSeries::new(
            "AAPL",
            Interval::FiveMinutes,
            vec![bar_at(0, 190.0), bar_at(5, 191.0), bar_at(10, 189.5)],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.last_close(), Some(189.5));
        assert!(series.has_full_ohlc());
        assert_eq!(series.price_extent(), Some((188.5, 192.0)));
    }

    #[test]
    fn rejects_duplicate_timestamps() {
        let result = PriceSeries::new(
            "AAPL",
            Interval::FiveMinutes,
            vec![bar_at(0, 190.0), bar_at(0, 191.0)],
        );
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn rejects_out_of_order_bars() {
        let result = PriceSeries::new(
            "AAPL",
            Interval::FiveMinutes,
            vec![bar_at(10, 190.0), bar_at(5, 191.0)],
        );
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn empty_series_is_constructible_but_has_no_extent() {
        let series = PriceSeries::new("MSFT", Interval::OneDay, Vec::new()).unwrap();
        assert!(series.is_empty());
        assert!(!series.has_full_ohlc());
        assert_eq!(series.last_close(), None);
        assert_eq!(series.price_extent(), None);
    }

    #[test]
    fn mixed_bars_are_not_full_ohlc() {
        let close_only = PriceBar::close_only(bar_at(5, 0.0).timestamp, 191.0);
        let series =
            PriceSeries::new("AAPL", Interval::FiveMinutes, vec![bar_at(0, 190.0), close_only])
                .unwrap();
        assert!(!series.has_full_ohlc());
    }
}
