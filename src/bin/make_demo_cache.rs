use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use trade_levels::config::DEMO;
use trade_levels::data::{CacheFile, MarketDataSource, YahooChartSource};
use trade_levels::domain::{SeriesRange, SeriesRequest};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(build_demo_cache())
}

/// Fetches every demo symbol once per demo interval and writes one cache file
/// per interval. Symbols that fail are logged and left out.
async fn build_demo_cache() -> Result<()> {
    let source = YahooChartSource::new().context("Failed to build the Yahoo client")?;

    for &interval in DEMO.intervals {
        let mut series = Vec::with_capacity(DEMO.symbols.len());
        for &symbol in DEMO.symbols {
            let request = SeriesRequest::new(symbol, SeriesRange::Period(DEMO.period), interval)?;
            match source.fetch_series(&request).await {
                Ok(fetched) => {
                    log::info!("{} {}: {} bars", symbol, interval, fetched.len());
                    series.push(fetched);
                }
                Err(e) => log::warn!("Skipping {} {}: {}", symbol, interval, e),
            }
        }

        if series.is_empty() {
            log::warn!("Nothing fetched for {}; leaving any existing cache alone", interval);
            continue;
        }

        let path = CacheFile::default_cache_path(interval);
        let count = series.len();
        CacheFile::new(interval, series).save_to_path(&path)?;
        log::info!("Demo cache written to {:?} with {} symbols.", path, count);
    }
    Ok(())
}
