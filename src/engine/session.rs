use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::config::MARKET;
use crate::domain::{
    Interval, Period, Portfolio, PositionValuation, SeriesRange, SeriesRequest, TradeLevels,
};
use crate::errors::PipelineError;

use super::messages::{AnalysisOutcome, AnalysisRequest, LevelSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum LevelMode {
    #[default]
    Manual,
    Sentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum RangeMode {
    #[default]
    #[strum(serialize = "Period")]
    Period,
    #[strum(serialize = "Date range")]
    Dates,
}

/// What the user has typed or picked. This is the only part of a session
/// that survives a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionInputs {
    pub ticker: String,
    pub range_mode: RangeMode,
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub interval: Interval,
    pub level_mode: LevelMode,
    pub manual_entry: f64,
    pub manual_stop_loss: f64,
    pub manual_target: f64,
    pub use_headlines: bool,
}

impl Default for SessionInputs {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            ticker: MARKET.defaults.symbol.to_string(),
            range_mode: RangeMode::default(),
            period: MARKET.defaults.period,
            start_date: today.checked_sub_days(Days::new(30)).unwrap_or(today),
            end_date: today,
            interval: MARKET.defaults.interval,
            level_mode: LevelMode::default(),
            manual_entry: 150.0,
            manual_stop_loss: 145.0,
            manual_target: 155.0,
            use_headlines: true,
        }
    }
}

impl SessionInputs {
    pub fn series_range(&self) -> SeriesRange {
        match self.range_mode {
            RangeMode::Period => SeriesRange::Period(self.period),
            RangeMode::Dates => SeriesRange::Dates {
                start: self.start_date,
                end: self.end_date,
            },
        }
    }

    pub fn level_source(&self) -> LevelSource {
        match self.level_mode {
            LevelMode::Manual => LevelSource::Manual {
                entry: self.manual_entry,
                stop_loss: self.manual_stop_loss,
                target: self.manual_target,
            },
            LevelMode::Sentiment => LevelSource::Sentiment,
        }
    }
}

/// Per-session state, owned by the app and passed by `&mut` into handlers.
///
/// Only `inputs` is persisted. The portfolio and analysis results live for
/// one session.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub inputs: SessionInputs,

    #[serde(skip)]
    portfolio: Portfolio,
    #[serde(skip)]
    last_outcome: Option<AnalysisOutcome>,
    #[serde(skip)]
    last_error: Option<PipelineError>,
    #[serde(skip)]
    last_prices: HashMap<String, f64>,
    #[serde(skip)]
    portfolio_error: Option<PipelineError>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analysis_request(&self) -> Result<AnalysisRequest, PipelineError> {
        let series = SeriesRequest::new(
            &self.inputs.ticker,
            self.inputs.series_range(),
            self.inputs.interval,
        )?;
        Ok(AnalysisRequest {
            series,
            level_source: self.inputs.level_source(),
            use_headlines: self.inputs.use_headlines,
            title: None,
        })
    }

    /// Stores the result of one cycle. A failure clears the previous chart so
    /// a stale symbol is never shown under a new notice.
    pub fn record(&mut self, result: Result<AnalysisOutcome, PipelineError>) {
        match result {
            Ok(outcome) => {
                if !outcome.levels.is_conventional_long() {
                    log::warn!(
                        "{} levels are not stop < entry <= target",
                        outcome.symbol()
                    );
                }
                if let Some(close) = outcome.last_close() {
                    self.last_prices.insert(outcome.symbol().to_string(), close);
                }
                self.last_outcome = Some(outcome);
                self.last_error = None;
            }
            Err(e) => {
                log::warn!("Analysis failed: {}", e);
                self.last_outcome = None;
                self.last_error = Some(e);
            }
        }
    }

    /// Request for the current inputs. Invalid inputs count as a failed
    /// analysis: the previous chart is cleared and the notice shown instead.
    pub fn prepare_request(&mut self) -> Option<AnalysisRequest> {
        match self.analysis_request() {
            Ok(request) => Some(request),
            Err(e) => {
                self.record(Err(e));
                None
            }
        }
    }

    pub fn last_outcome(&self) -> Option<&AnalysisOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn last_levels(&self) -> Option<TradeLevels> {
        self.last_outcome.as_ref().map(|o| o.levels)
    }

    pub fn last_error(&self) -> Option<&PipelineError> {
        self.last_error.as_ref()
    }

    /// Text shown in place of the chart when the last action failed.
    pub fn notice(&self) -> Option<String> {
        self.last_error.as_ref().map(PipelineError::user_notice)
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn add_position(
        &mut self,
        ticker: &str,
        buy_price: f64,
        quantity: f64,
    ) -> Result<(), PipelineError> {
        match self.portfolio.add(ticker, buy_price, quantity) {
            Ok(_) => {
                self.portfolio_error = None;
                Ok(())
            }
            Err(e) => {
                self.portfolio_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Why the last position was rejected, until the next accepted one.
    pub fn portfolio_notice(&self) -> Option<String> {
        self.portfolio_error.as_ref().map(PipelineError::user_notice)
    }

    /// Portfolio marked against the latest close seen for each ticker this session.
    pub fn valuations(&self) -> Vec<PositionValuation> {
        self.portfolio.valuations(&self.last_prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{TradeLevelCalculator, build_chart_spec};
    use crate::domain::{PriceBar, PriceSeries};
    use crate::models::AxisLabels;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn outcome(symbol: &str, close: f64) -> AnalysisOutcome {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 20, 0, 0).unwrap();
        let series =
            PriceSeries::new(symbol, Interval::OneDay, vec![PriceBar::close_only(ts, close)])
                .unwrap();
        let levels = TradeLevelCalculator::default()
            .derive_levels(close, crate::analysis::SentimentScore::NEUTRAL)
            .unwrap();
        let chart =
            build_chart_spec(series, &levels.as_level_map(), "t", AxisLabels::default()).unwrap();
        AnalysisOutcome {
            chart,
            levels,
            sentiment: None,
            headline_count: 0,
            source_signature: "test",
            prediction: Err(PipelineError::PredictionUnavailable("n/a".into())),
            prediction_authoritative: false,
            elapsed: Duration::from_millis(5),
        }
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let inputs = SessionInputs::default();
        assert_eq!(inputs.ticker, "AAPL");
        assert_eq!(
            (inputs.manual_entry, inputs.manual_stop_loss, inputs.manual_target),
            (150.0, 145.0, 155.0)
        );
        assert_eq!(inputs.level_mode, LevelMode::Manual);
        assert!(inputs.start_date < inputs.end_date);
    }

    #[test]
    fn request_reflects_the_inputs() {
        let mut session = SessionContext::new();
        session.inputs.ticker = " tsla".to_string();
        session.inputs.level_mode = LevelMode::Sentiment;
        session.inputs.range_mode = RangeMode::Dates;

        let request = session.analysis_request().unwrap();
        assert_eq!(request.series.symbol, "TSLA");
        assert_eq!(request.level_source, LevelSource::Sentiment);
        assert!(matches!(request.series.range, SeriesRange::Dates { .. }));

        session.inputs.ticker = String::new();
        assert!(session.analysis_request().is_err());
    }

    #[test]
    fn failure_replaces_the_chart_with_a_notice() {
        let mut session = SessionContext::new();
        session.record(Ok(outcome("AAPL", 150.0)));
        assert_eq!(session.last_levels().map(|l| l.stop_loss), Some(147.0));
        assert!(session.notice().is_none());

        session.record(Err(PipelineError::empty_series("ZZZZ")));
        assert!(session.last_outcome().is_none());
        assert_eq!(
            session.notice().as_deref(),
            Some("No data available for the selected stock and time range.")
        );
    }

    #[test]
    fn portfolio_is_valued_at_the_last_seen_close() {
        let mut session = SessionContext::new();
        session.add_position("aapl", 100.0, 2.0).unwrap();
        session.add_position("MSFT", 300.0, 1.0).unwrap();
        session.record(Ok(outcome("AAPL", 150.0)));

        let valuations = session.valuations();
        assert_eq!(valuations[0].market_value, Some(300.0));
        assert_eq!(valuations[0].unrealized_pnl, Some(100.0));
        assert_eq!(valuations[1].last_price, None);
        assert!(session.add_position("MSFT", -1.0, 1.0).is_err());
        assert_eq!(session.portfolio().len(), 2);
    }

    #[test]
    fn invalid_inputs_clear_the_previous_chart() {
        let mut session = SessionContext::new();
        session.record(Ok(outcome("AAPL", 150.0)));
        assert!(session.prepare_request().is_some());

        session.inputs.ticker = "   ".to_string();
        assert!(session.prepare_request().is_none());
        assert!(session.last_outcome().is_none());
        assert!(matches!(
            session.last_error(),
            Some(PipelineError::InvalidInput(_))
        ));

        session.inputs.ticker = "AAPL".to_string();
        session.inputs.range_mode = RangeMode::Dates;
        session.inputs.end_date = session.inputs.start_date;
        assert!(session.prepare_request().is_none());
        assert!(session.notice().is_some_and(|n| n.starts_with("Please check your inputs")));
    }

    #[test]
    fn rejected_position_notice_clears_on_the_next_add() {
        let mut session = SessionContext::new();
        assert!(session.add_position("", 100.0, 1.0).is_err());
        assert!(session.portfolio_notice().is_some());
        // Portfolio problems never replace the chart notice
        assert!(session.notice().is_none());

        session.add_position("AAPL", 100.0, 1.0).unwrap();
        assert!(session.portfolio_notice().is_none());
        assert_eq!(session.portfolio().len(), 1);
    }

    #[test]
    fn only_inputs_are_persisted() {
        let mut session = SessionContext::new();
        session.inputs.ticker = "NVDA".to_string();
        session.add_position("NVDA", 100.0, 1.0).unwrap();
        session.record(Ok(outcome("NVDA", 120.0)));

        let json = serde_json::to_string(&session).unwrap();
        let restored: SessionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.inputs.ticker, "NVDA");
        assert!(restored.portfolio().is_empty());
        assert!(restored.last_outcome().is_none());
    }
}
