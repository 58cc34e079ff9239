// Market data, headlines and the offline cache
pub mod cache_file;
pub mod headlines;
pub mod market_data;
pub mod sources;
pub mod yahoo;

// Re-export commonly used types
pub use cache_file::{CacheFile, CachedSeriesSource};
pub use headlines::{HeadlineSource, YahooNewsSource, headlines_or_empty};
pub use market_data::{MarketDataSource, fetch_series_with_fallback};
pub use sources::{headline_source, market_sources};
pub use yahoo::{YahooChartSource, series_from_chart_response};
