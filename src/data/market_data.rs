use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{PriceSeries, SeriesRequest};
use crate::errors::PipelineError;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_series(&self, request: &SeriesRequest) -> Result<PriceSeries, PipelineError>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Tries each source in order and returns the first series that arrives.
///
/// When every source fails the error is `EmptySeries` only if all of them
/// agreed there was no data; otherwise the first real failure is reported.
pub async fn fetch_series_with_fallback(
    sources: &[Box<dyn MarketDataSource>],
    request: &SeriesRequest,
) -> Result<(PriceSeries, &'static str), PipelineError> {
    let mut first_failure: Option<PipelineError> = None;
    let mut saw_empty = false;

    for source in sources {
        match source.fetch_series(request).await {
            Ok(series) if series.is_empty() => {
                log::info!("{} returned no bars for {}", source.signature(), request.symbol);
                saw_empty = true;
            }
            Ok(series) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_source_selection {
                    log::info!(
                        "{} bars of {} ({}, {}) served by {}",
                        series.len(),
                        request.symbol,
                        request.range,
                        request.interval,
                        source.signature()
                    );
                }
                return Ok((series, source.signature()));
            }
            Err(PipelineError::EmptySeries { .. }) => {
                log::info!("{} has no data for {}", source.signature(), request.symbol);
                saw_empty = true;
            }
            Err(e) => {
                log::warn!("{} failed for {}: {}", source.signature(), request.symbol, e);
                first_failure.get_or_insert(e);
            }
        }
    }

    match first_failure {
        Some(e) => Err(e),
        None if saw_empty => Err(PipelineError::empty_series(&request.symbol)),
        None => Err(PipelineError::upstream(
            "market data",
            "no market-data source is configured",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Interval, PriceBar, SeriesRange};
    use chrono::{TimeZone, Utc};

    enum Stub {
        Bars(f64),
        Empty,
        Down,
    }

    #[async_trait]
    impl MarketDataSource for Stub {
        async fn fetch_series(
            &self,
            request: &SeriesRequest,
        ) -> Result<PriceSeries, PipelineError> {
            match self {
                Stub::Bars(close) => {
                    let ts = Utc.with_ymd_and_hms(2024, 6, 3, 14, 0, 0).unwrap();
                    PriceSeries::new(
                        request.symbol.clone(),
                        request.interval,
                        vec![PriceBar::close_only(ts, *close)],
                    )
                }
                Stub::Empty => Err(PipelineError::empty_series(&request.symbol)),
                Stub::Down => Err(PipelineError::upstream("stub", "connection refused")),
            }
        }

        fn signature(&self) -> &'static str {
            match self {
                Stub::Bars(_) => "bars",
                Stub::Empty => "empty",
                Stub::Down => "down",
            }
        }
    }

    fn request() -> SeriesRequest {
        SeriesRequest::new("msft", SeriesRange::default(), Interval::FiveMinutes).unwrap()
    }

    #[tokio::test]
    async fn falls_through_to_the_first_working_source() {
        let sources: Vec<Box<dyn MarketDataSource>> =
            vec![Box::new(Stub::Down), Box::new(Stub::Empty), Box::new(Stub::Bars(410.0))];
        let (series, signature) = fetch_series_with_fallback(&sources, &request()).await.unwrap();
        assert_eq!(signature, "bars");
        assert_eq!(series.symbol(), "MSFT");
        assert_eq!(series.last_close(), Some(410.0));
    }

    #[tokio::test]
    async fn all_empty_is_reported_as_empty_series() {
        let sources: Vec<Box<dyn MarketDataSource>> =
            vec![Box::new(Stub::Empty), Box::new(Stub::Empty)];
        let result = fetch_series_with_fallback(&sources, &request()).await;
        assert_eq!(result.unwrap_err(), PipelineError::empty_series("MSFT"));
    }

    #[tokio::test]
    async fn a_real_failure_wins_over_a_cache_miss() {
        let sources: Vec<Box<dyn MarketDataSource>> =
            vec![Box::new(Stub::Empty), Box::new(Stub::Down)];
        let result = fetch_series_with_fallback(&sources, &request()).await;
        assert!(matches!(result, Err(PipelineError::UpstreamFailure { .. })));
    }

    #[tokio::test]
    async fn no_sources_is_an_upstream_failure() {
        let result = fetch_series_with_fallback(&[], &request()).await;
        assert!(matches!(result, Err(PipelineError::UpstreamFailure { .. })));
    }
}
