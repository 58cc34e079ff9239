use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::errors::PipelineError;
use crate::utils::TimeUtils;

/// Bar width. `Display` gives the provider query string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Interval {
    #[strum(serialize = "1m")]
    OneMinute,
    #[strum(serialize = "5m")]
    #[default]
    FiveMinutes,
    #[strum(serialize = "15m")]
    FifteenMinutes,
    #[strum(serialize = "30m")]
    ThirtyMinutes,
    #[strum(serialize = "1h")]
    OneHour,
    #[strum(serialize = "1d")]
    OneDay,
    #[strum(serialize = "1wk")]
    OneWeek,
}

impl Interval {
    pub fn duration_ms(&self) -> i64 {
        match self {
            Interval::OneMinute => TimeUtils::MS_IN_MIN,
            Interval::FiveMinutes => TimeUtils::MS_IN_5_MIN,
            Interval::FifteenMinutes => TimeUtils::MS_IN_15_MIN,
            Interval::ThirtyMinutes => TimeUtils::MS_IN_30_MIN,
            Interval::OneHour => TimeUtils::MS_IN_H,
            Interval::OneDay => TimeUtils::MS_IN_D,
            Interval::OneWeek => TimeUtils::MS_IN_W,
        }
    }
}

/// Look-back window ending now.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Period {
    #[strum(serialize = "1d")]
    #[default]
    OneDay,
    #[strum(serialize = "5d")]
    FiveDays,
    #[strum(serialize = "1mo")]
    OneMonth,
    #[strum(serialize = "3mo")]
    ThreeMonths,
    #[strum(serialize = "6mo")]
    SixMonths,
    #[strum(serialize = "1y")]
    OneYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesRange {
    Period(Period),
    /// `start` inclusive, `end` exclusive.
    Dates { start: NaiveDate, end: NaiveDate },
}

impl Default for SeriesRange {
    fn default() -> Self {
        SeriesRange::Period(Period::default())
    }
}

impl std::fmt::Display for SeriesRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesRange::Period(period) => write!(f, "{}", period),
            SeriesRange::Dates { start, end } => write!(f, "{} to {}", start, end),
        }
    }
}

/// What the market-data collaborator is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub symbol: String,
    pub range: SeriesRange,
    pub interval: Interval,
}

impl SeriesRequest {
    /// Normalises the ticker (trimmed, upper-case) and checks the range.
    pub fn new(
        symbol: &str,
        range: SeriesRange,
        interval: Interval,
    ) -> Result<Self, PipelineError> {
        let symbol = normalise_ticker(symbol)?;
        if let SeriesRange::Dates { start, end } = range {
            if start >= end {
                return Err(PipelineError::invalid(format!(
                    "start date {} must be before end date {}",
                    start, end
                )));
            }
        }
        Ok(Self {
            symbol,
            range,
            interval,
        })
    }
}

pub fn normalise_ticker(raw: &str) -> Result<String, PipelineError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(PipelineError::invalid("ticker symbol is empty"));
    }
    // Yahoo symbols: BRK-B, ^GSPC, EURUSD=X, RDS.A. Anything else would
    // break the URL path it is placed in.
    if let Some(bad) = ticker
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(PipelineError::invalid(format!(
            "ticker symbol '{}' contains '{}'",
            ticker, bad
        )));
    }
    Ok(ticker)
}
