// Builds the collaborator chains the pipeline runs against, from the command line.

use std::path::Path;

use crate::Cli;
use crate::config::PERSISTENCE;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::cache_file::CachedSeriesSource;
use crate::data::headlines::{HeadlineSource, YahooNewsSource};
use crate::data::market_data::MarketDataSource;
use crate::data::yahoo::YahooChartSource;

/// Yahoo first unless `--prefer-cache`; the cache is always in the chain as a fallback.
pub fn market_sources(args: &Cli) -> Vec<Box<dyn MarketDataSource>> {
    let cache: Box<dyn MarketDataSource> = Box::new(CachedSeriesSource::default());

    let yahoo: Option<Box<dyn MarketDataSource>> = match YahooChartSource::new() {
        Ok(source) => Some(Box::new(source)),
        Err(e) => {
            log::warn!("⚠️  Yahoo client unavailable, using local cache only: {}", e);
            None
        }
    };

    if !Path::new(PERSISTENCE.series.directory).exists() {
        log::info!(
            "No local cache at '{}' (run make_demo_cache to create one)",
            PERSISTENCE.series.directory
        );
    }

    let sources: Vec<Box<dyn MarketDataSource>> = match (args.prefer_cache, yahoo) {
        (true, Some(yahoo)) => vec![cache, yahoo],
        (false, Some(yahoo)) => vec![yahoo, cache],
        (_, None) => vec![cache],
    };

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_source_selection {
        let order: Vec<&str> = sources.iter().map(|s| s.signature()).collect();
        log::info!("Market-data source order: {:?}", order);
    }
    sources
}

/// `None` when headlines are switched off or the client cannot be built.
pub fn headline_source(args: &Cli) -> Option<Box<dyn HeadlineSource>> {
    if args.no_headlines {
        log::info!("Headline fetching disabled; sentiment will be neutral");
        return None;
    }
    match YahooNewsSource::new() {
        Ok(source) => Some(Box::new(source)),
        Err(e) => {
            log::warn!("⚠️  Headline client unavailable: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(prefer_cache: bool, no_headlines: bool) -> Cli {
        Cli {
            prefer_cache,
            symbol: None,
            no_headlines,
        }
    }

    #[test]
    fn prefer_cache_puts_the_cache_first() {
        let signatures = |args: &Cli| -> Vec<&'static str> {
            market_sources(args).iter().map(|s| s.signature()).collect()
        };
        assert_eq!(signatures(&cli(false, false)), vec!["Yahoo Finance", "Local Cache"]);
        assert_eq!(signatures(&cli(true, false)), vec!["Local Cache", "Yahoo Finance"]);
    }

    #[test]
    fn headlines_can_be_switched_off() {
        assert!(headline_source(&cli(false, true)).is_none());
        assert!(headline_source(&cli(false, false)).is_some());
    }
}
