use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{PERSISTENCE, series_cache_filename};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::market_data::MarketDataSource;
use crate::domain::{Interval, PriceSeries, SeriesRange, SeriesRequest};
use crate::errors::PipelineError;
use crate::utils::time_utils::{how_many_seconds_ago, utc_now_as_timestamp_ms};

/// Serialized cache of price series for one interval.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CacheFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub interval: Interval,
    pub series: Vec<PriceSeries>,
}

impl CacheFile {
    pub fn new(interval: Interval, series: Vec<PriceSeries>) -> Self {
        Self {
            version: PERSISTENCE.series.version,
            timestamp_ms: utc_now_as_timestamp_ms(),
            interval,
            series,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: CacheFile = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;

        if cache.version != PERSISTENCE.series.version {
            bail!(
                "Cache version mismatch: file v{} vs required v{}",
                cache.version,
                PERSISTENCE.series.version
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }

    pub fn path_in(directory: &Path, interval: Interval) -> PathBuf {
        directory.join(series_cache_filename(interval))
    }

    pub fn default_cache_path(interval: Interval) -> PathBuf {
        Self::path_in(Path::new(PERSISTENCE.series.directory), interval)
    }

    pub fn find(&self, symbol: &str) -> Option<&PriceSeries> {
        self.series.iter().find(|s| s.symbol() == symbol)
    }
}

/// Cached series clipped to a request. Look-back periods return the whole
/// cached series; explicit dates keep bars in `[start, end)`.
fn clip_to_range(series: &PriceSeries, range: SeriesRange) -> Result<PriceSeries, PipelineError> {
    match range {
        SeriesRange::Period(_) => Ok(series.clone()),
        SeriesRange::Dates { start, end } => {
            let bars = series
                .bars()
                .iter()
                .filter(|bar| {
                    let day = bar.timestamp.date_naive();
                    day >= start && day < end
                })
                .cloned()
                .collect();
            PriceSeries::new(series.symbol(), series.interval(), bars)
        }
    }
}

/// Offline source backed by bincode cache files written by `make_demo_cache`.
pub struct CachedSeriesSource {
    directory: PathBuf,
}

impl Default for CachedSeriesSource {
    fn default() -> Self {
        Self::new(PERSISTENCE.series.directory)
    }
}

impl CachedSeriesSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

#[async_trait]
impl MarketDataSource for CachedSeriesSource {
    fn signature(&self) -> &'static str {
        "Local Cache"
    }

    async fn fetch_series(&self, request: &SeriesRequest) -> Result<PriceSeries, PipelineError> {
        let path = CacheFile::path_in(&self.directory, request.interval);

        // No cache written for this interval yet is a miss, not an outage.
        if !path.is_file() {
            log::info!("No cache file at {:?}", path);
            return Err(PipelineError::empty_series(&request.symbol));
        }

        // bincode reads are blocking file I/O
        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&path))
            .await
            .map_err(|e| PipelineError::upstream(self.signature(), e))?
            .map_err(|e| PipelineError::upstream(self.signature(), format!("{:#}", e)))?;

        let age_secs = how_many_seconds_ago(cache.timestamp_ms);
        if age_secs > PERSISTENCE.series.acceptable_age_secs {
            log::warn!(
                "Serving {} from a cache written {} seconds ago (limit {} seconds)",
                request.symbol,
                age_secs,
                PERSISTENCE.series.acceptable_age_secs
            );
        }

        let Some(series) = cache.find(&request.symbol) else {
            return Err(PipelineError::empty_series(&request.symbol));
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_source_selection {
            log::info!(
                "Cache hit for {} ({} bars, {}s old)",
                request.symbol,
                series.len(),
                age_secs
            );
        }

        let clipped = clip_to_range(series, request.range)?;
        if clipped.is_empty() {
            return Err(PipelineError::empty_series(&request.symbol));
        }
        Ok(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Period, PriceBar};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn daily(symbol: &str) -> PriceSeries {
        let bars = (1..=5)
            .map(|day| {
                let ts = Utc.with_ymd_and_hms(2024, 3, day, 21, 0, 0).unwrap();
                PriceBar::new(ts, 100.0, 106.0, 99.0, 100.0 + day as f64, Some(5_000.0))
            })
            .collect();
        PriceSeries::new(symbol, Interval::OneDay, bars).unwrap()
    }

    fn write_cache(dir: &Path) {
        let cache = CacheFile::new(Interval::OneDay, vec![daily("AAPL"), daily("TSLA")]);
        cache
            .save_to_path(&CacheFile::path_in(dir, Interval::OneDay))
            .unwrap();
    }

    #[test]
    fn cache_survives_a_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("series.bin");
        let cache = CacheFile::new(Interval::OneDay, vec![daily("AAPL")]);
        cache.save_to_path(&path).unwrap();

        let loaded = CacheFile::load_from_path(&path).unwrap();
        assert_eq!(loaded, cache);
        assert!(loaded.find("AAPL").is_some());
        assert!(loaded.find("MSFT").is_none());
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.bin");
        let mut cache = CacheFile::new(Interval::OneDay, vec![]);
        cache.version = PERSISTENCE.series.version + 1.0;
        cache.save_to_path(&path).unwrap();

        let err = CacheFile::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("version mismatch"));
    }

    #[tokio::test]
    async fn cached_source_serves_known_symbols() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(dir.path());
        let source = CachedSeriesSource::new(dir.path());

        let range = SeriesRange::Period(Period::FiveDays);
        let request = SeriesRequest::new("tsla", range, Interval::OneDay).unwrap();
        let series = source.fetch_series(&request).await.unwrap();
        assert_eq!(series.symbol(), "TSLA");
        assert_eq!(series.len(), 5);
    }

    #[tokio::test]
    async fn date_ranges_are_clipped_end_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        write_cache(dir.path());
        let source = CachedSeriesSource::new(dir.path());

        let range = SeriesRange::Dates {
            start: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        };
        let request = SeriesRequest::new("AAPL", range, Interval::OneDay).unwrap();
        let series = source.fetch_series(&request).await.unwrap();
        assert_eq!(series.closes(), vec![102.0, 103.0]);
    }

    #[tokio::test]
    async fn misses_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = CachedSeriesSource::new(dir.path());
        let request = SeriesRequest::new("AAPL", SeriesRange::default(), Interval::OneDay).unwrap();

        // No file yet
        assert_eq!(
            source.fetch_series(&request).await,
            Err(PipelineError::empty_series("AAPL"))
        );

        // Unreadable file is a real failure
        std::fs::write(CacheFile::path_in(dir.path(), Interval::OneDay), b"not bincode").unwrap();
        assert!(matches!(
            source.fetch_series(&request).await,
            Err(PipelineError::UpstreamFailure { .. })
        ));

        write_cache(dir.path());
        let unknown = SeriesRequest::new("NVDA", SeriesRange::default(), Interval::OneDay).unwrap();
        assert_eq!(
            source.fetch_series(&unknown).await,
            Err(PipelineError::empty_series("NVDA"))
        );
    }

    struct UnknownSymbol;

    #[async_trait]
    impl MarketDataSource for UnknownSymbol {
        async fn fetch_series(
            &self,
            request: &SeriesRequest,
        ) -> Result<PriceSeries, PipelineError> {
            Err(PipelineError::empty_series(&request.symbol))
        }

        fn signature(&self) -> &'static str {
            "unknown"
        }
    }

    #[tokio::test]
    async fn unknown_ticker_without_a_cache_file_reads_as_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let sources: Vec<Box<dyn MarketDataSource>> = vec![
            Box::new(UnknownSymbol),
            Box::new(CachedSeriesSource::new(dir.path())),
        ];
        let request = SeriesRequest::new("zzzz", SeriesRange::default(), Interval::OneDay).unwrap();

        let err = crate::data::fetch_series_with_fallback(&sources, &request)
            .await
            .unwrap_err();
        assert_eq!(err, PipelineError::empty_series("ZZZZ"));
        assert_eq!(
            err.user_notice(),
            "No data available for the selected stock and time range."
        );
    }
}
