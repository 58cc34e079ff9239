use std::time::Duration;

use crate::analysis::{Prediction, SentimentScore};
use crate::domain::{SeriesRequest, TradeLevels};
use crate::errors::PipelineError;
use crate::models::ChartSpec;

/// Where the entry/stop/target come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelSource {
    /// User-typed prices, validated and used unchanged
    Manual {
        entry: f64,
        stop_loss: f64,
        target: f64,
    },
    /// Derived from the last close and headline sentiment
    Sentiment,
}

/// One user action: fetch, score, derive, annotate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub series: SeriesRequest,
    pub level_source: LevelSource,
    pub use_headlines: bool,
    /// Defaults to "{SYMBOL} Entry and Stop Loss Chart"
    pub title: Option<String>,
}

/// Everything the UI shows after a successful cycle
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub chart: ChartSpec,
    pub levels: TradeLevels,
    pub sentiment: Option<SentimentScore>,
    pub headline_count: usize,
    pub source_signature: &'static str,
    // Err(PredictionUnavailable) until a real model is plugged in
    pub prediction: Result<Prediction, PipelineError>,
    /// False when the predictor is a placeholder; its numbers are not a forecast.
    pub prediction_authoritative: bool,
    pub elapsed: Duration,
}

impl AnalysisOutcome {
    pub fn symbol(&self) -> &str {
        self.chart.series().symbol()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.chart.series().last_close()
    }

    /// The prediction, only when it came from a real model.
    pub fn forecast(&self) -> Option<&Prediction> {
        match &self.prediction {
            Ok(prediction) if self.prediction_authoritative => Some(prediction),
            _ => None,
        }
    }
}
