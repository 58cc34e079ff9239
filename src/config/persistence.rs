//! File persistence and serialization configuration

use crate::domain::Interval;

pub struct SeriesCacheConfig {
    /// Directory path for storing cached price series
    pub directory: &'static str,
    /// Base filename for cache files (without extension)
    pub filename_without_ext: &'static str,
    /// Current version of the cache serialization format
    pub version: f64,
    /// Cached series older than this are still served, but logged as stale
    pub acceptable_age_secs: i64,
}

pub struct PersistenceConfig {
    pub series: SeriesCacheConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    series: SeriesCacheConfig {
        directory: "price_data",
        filename_without_ext: "series",
        version: 1.0,
        acceptable_age_secs: 86_400,
    },
};

/// Generate interval-specific cache filename
/// Example: "series_5m_v1.bin" or "series_1d_v1.bin"
pub fn series_cache_filename(interval: Interval) -> String {
    format!(
        "{}_{}_v{}.bin",
        PERSISTENCE.series.filename_without_ext, interval, PERSISTENCE.series.version
    )
}

// App state persistence
/// Path for saving/loading dashboard input state (never the portfolio)
pub const APP_STATE_PATH: &str = ".states.json";
