//! The request/response cycle behind the Generate button.
//!
//! fetch series -> (headlines -> sentiment) -> levels -> chart spec -> prediction.
//! Each stage is a plain function from `analysis`; this type only wires the
//! collaborators together and decides which stage runs.

use crate::Cli;
use crate::analysis::{
    PredictionStub, PricePredictor, SentimentScore, SentimentScorer, TradeLevelCalculator,
    build_chart_spec, default_title, levels_from_input,
};
use crate::data::{
    HeadlineSource, MarketDataSource, fetch_series_with_fallback, headline_source,
    headlines_or_empty, market_sources,
};
use crate::domain::TradeLevels;
use crate::errors::PipelineError;
use crate::models::AxisLabels;
use crate::utils::app_time::now;

use super::messages::{AnalysisOutcome, AnalysisRequest, LevelSource};

pub struct TradePipeline {
    market_sources: Vec<Box<dyn MarketDataSource>>,
    headlines: Option<Box<dyn HeadlineSource>>,
    scorer: SentimentScorer,
    calculator: TradeLevelCalculator,
    predictor: Box<dyn PricePredictor>,
}

impl TradePipeline {
    pub fn new(
        market_sources: Vec<Box<dyn MarketDataSource>>,
        headlines: Option<Box<dyn HeadlineSource>>,
    ) -> Self {
        Self {
            market_sources,
            headlines,
            scorer: SentimentScorer::default(),
            calculator: TradeLevelCalculator::default(),
            predictor: Box::new(PredictionStub),
        }
    }

    /// Production wiring: Yahoo plus the local cache, ordered by the command line.
    pub fn from_cli(args: &Cli) -> Self {
        Self::new(market_sources(args), headline_source(args))
    }

    pub fn with_predictor(mut self, predictor: Box<dyn PricePredictor>) -> Self {
        self.predictor = predictor;
        self
    }

    pub fn has_headline_source(&self) -> bool {
        self.headlines.is_some()
    }

    async fn sentiment_for(&self, symbol: &str) -> (SentimentScore, usize) {
        let Some(source) = self.headlines.as_deref() else {
            return (SentimentScore::NEUTRAL, 0);
        };
        let headlines = headlines_or_empty(source, symbol).await;
        let score = self.scorer.score(&headlines);
        log::info!(
            "{} headlines for {} scored {:+.3} ({})",
            headlines.len(),
            symbol,
            score.value(),
            score.level()
        );
        (score, headlines.len())
    }

    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, PipelineError> {
        let start = now();
        let symbol = request.series.symbol.clone();

        // Manual prices are checked before any network traffic.
        let manual = match request.level_source {
            LevelSource::Manual {
                entry,
                stop_loss,
                target,
            } => Some(levels_from_input(entry, stop_loss, target)?),
            LevelSource::Sentiment => None,
        };

        let (series, source_signature) =
            fetch_series_with_fallback(&self.market_sources, &request.series).await?;
        if series.is_empty() {
            return Err(PipelineError::empty_series(&symbol));
        }

        let (sentiment, headline_count) = if request.use_headlines {
            let (score, count) = self.sentiment_for(&symbol).await;
            (Some(score), count)
        } else {
            (None, 0)
        };

        let levels: TradeLevels = match manual {
            Some(levels) => levels,
            None => {
                let reference_price = series
                    .last_close()
                    .ok_or_else(|| PipelineError::empty_series(&symbol))?;
                self.calculator
                    .derive_levels(reference_price, sentiment.unwrap_or(SentimentScore::NEUTRAL))?
            }
        };

        let title = request.title.unwrap_or_else(|| default_title(&symbol));
        let chart = build_chart_spec(series, &levels.as_level_map(), title, AxisLabels::default())?;

        let prediction = self.predictor.predict(&symbol);
        let prediction_authoritative = self.predictor.is_authoritative();
        match &prediction {
            Err(e) => log::debug!("{}", e),
            Ok(_) if !prediction_authoritative => {
                log::warn!("Prediction for {} comes from a placeholder model", symbol)
            }
            Ok(_) => {}
        }

        let elapsed = start.elapsed();
        log::info!(
            "Analysed {} via {} in {:?}: entry {:.2}, stop {:.2}, target {:.2}",
            symbol,
            source_signature,
            elapsed,
            levels.entry,
            levels.stop_loss,
            levels.target
        );

        Ok(AnalysisOutcome {
            chart,
            levels,
            sentiment,
            headline_count,
            source_signature,
            prediction,
            prediction_authoritative,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Direction, Prediction};
    use crate::domain::{Interval, PriceBar, PriceSeries, SeriesRange, SeriesRequest};
    use crate::models::ChartKind;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSeries {
        closes: Vec<f64>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MarketDataSource for FixedSeries {
        async fn fetch_series(
            &self,
            request: &SeriesRequest,
        ) -> Result<PriceSeries, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let start = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();
            let bars = self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &close)| {
                    let ts = start + Duration::minutes(5 * i as i64);
                    PriceBar::new(ts, close, close + 1.0, close - 1.0, close, None)
                })
                .collect();
            PriceSeries::new(request.symbol.clone(), request.interval, bars)
        }

        fn signature(&self) -> &'static str {
            "fixed"
        }
    }

    struct Headlines(Result<Vec<String>, PipelineError>);

    #[async_trait]
    impl HeadlineSource for Headlines {
        async fn fetch_headlines(&self, _symbol: &str) -> Result<Vec<String>, PipelineError> {
            self.0.clone()
        }

        fn signature(&self) -> &'static str {
            "headlines"
        }
    }

    fn pipeline(closes: Vec<f64>, headlines: Option<Headlines>) -> (TradePipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = FixedSeries {
            closes,
            calls: Arc::clone(&calls),
        };
        let headlines = headlines.map(|h| Box::new(h) as Box<dyn HeadlineSource>);
        (TradePipeline::new(vec![Box::new(source)], headlines), calls)
    }

    fn request(level_source: LevelSource, use_headlines: bool) -> AnalysisRequest {
        AnalysisRequest {
            series: SeriesRequest::new("aapl", SeriesRange::default(), Interval::FiveMinutes)
                .unwrap(),
            level_source,
            use_headlines,
            title: None,
        }
    }

    #[tokio::test]
    async fn manual_levels_are_drawn_unchanged() {
        let (pipeline, _) = pipeline(vec![148.0, 149.0, 150.0], None);
        let manual = LevelSource::Manual {
            entry: 150.0,
            stop_loss: 145.0,
            target: 155.0,
        };
        let outcome = pipeline.run(request(manual, false)).await.unwrap();

        assert_eq!(outcome.levels.entry, 150.0);
        assert_eq!(outcome.chart.reference_lines().len(), 3);
        assert_eq!(outcome.chart.title(), "AAPL Entry and Stop Loss Chart");
        assert_eq!(outcome.chart.kind(), ChartKind::Candlestick);
        assert_eq!(outcome.source_signature, "fixed");
        assert!(outcome.sentiment.is_none());
        assert!(matches!(
            outcome.prediction,
            Err(PipelineError::PredictionUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn sentiment_levels_use_the_last_close() {
        let headlines = Headlines(Ok(vec!["Shares surge to a record".to_string()]));
        let (pipeline, _) = pipeline(vec![140.0, 150.0], Some(headlines));
        let outcome = pipeline.run(request(LevelSource::Sentiment, true)).await.unwrap();

        let score = outcome.sentiment.unwrap().value();
        assert!(score > 0.0);
        assert_eq!(outcome.headline_count, 1);
        assert_eq!(outcome.levels.stop_loss, 147.0);
        assert!(outcome.levels.entry > 150.0);
    }

    #[tokio::test]
    async fn failed_headlines_score_neutral() {
        let headlines = Headlines(Err(PipelineError::upstream("headlines", "timed out")));
        let (pipeline, _) = pipeline(vec![150.0], Some(headlines));
        let outcome = pipeline.run(request(LevelSource::Sentiment, true)).await.unwrap();

        assert_eq!(outcome.sentiment, Some(SentimentScore::NEUTRAL));
        assert_eq!(outcome.levels.entry, 150.0);
        assert_eq!(outcome.levels.target, 150.0);
    }

    #[tokio::test]
    async fn empty_series_stops_the_cycle() {
        let (pipeline, _) = pipeline(vec![], None);
        let result = pipeline.run(request(LevelSource::Sentiment, false)).await;
        assert_eq!(result.unwrap_err(), PipelineError::empty_series("AAPL"));
    }

    struct AlwaysUp;

    impl PricePredictor for AlwaysUp {
        fn predict(&self, _ticker: &str) -> Result<Prediction, PipelineError> {
            Prediction::new(1.2, Direction::Bullish, 60.0)
        }

        fn is_authoritative(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn predictor_can_be_swapped() {
        let (pipeline, _) = pipeline(vec![150.0], None);
        let pipeline = pipeline.with_predictor(Box::new(AlwaysUp));
        let outcome = pipeline.run(request(LevelSource::Sentiment, false)).await.unwrap();
        assert!(outcome.prediction_authoritative);
        assert_eq!(outcome.forecast().map(|p| p.direction), Some(Direction::Bullish));
    }

    /// Returns numbers but admits it is not a model.
    struct CoinFlip;

    impl PricePredictor for CoinFlip {
        fn predict(&self, _ticker: &str) -> Result<Prediction, PipelineError> {
            Prediction::new(-0.8, Direction::Bearish, 50.0)
        }

        fn is_authoritative(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn placeholder_predictions_are_not_forecasts() {
        let (pipeline, _) = pipeline(vec![150.0], None);
        let pipeline = pipeline.with_predictor(Box::new(CoinFlip));
        let outcome = pipeline.run(request(LevelSource::Sentiment, false)).await.unwrap();

        assert!(!outcome.prediction_authoritative);
        assert!(outcome.prediction.is_ok());
        assert!(outcome.forecast().is_none());
    }

    #[tokio::test]
    async fn default_stub_is_flagged_non_authoritative() {
        let (pipeline, _) = pipeline(vec![150.0], None);
        let outcome = pipeline.run(request(LevelSource::Sentiment, false)).await.unwrap();
        assert!(!outcome.prediction_authoritative);
        assert!(outcome.forecast().is_none());
    }

    #[tokio::test]
    async fn bad_manual_input_is_rejected_before_fetching() {
        let (pipeline, calls) = pipeline(vec![150.0], None);
        let manual = LevelSource::Manual {
            entry: 0.0,
            stop_loss: 145.0,
            target: 155.0,
        };
        let result = pipeline.run(request(manual, false)).await;
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
