//! config/demo.rs Offline demo cache knobs.
//!
//! `make_demo_cache` fetches these symbols once so the dashboard can run
//! from the cache with `--prefer-cache` when the network is unavailable.

use crate::domain::{Interval, Period};

/// The Master Demo Configuration
pub struct DemoConfig {
    /// Curated list of tickers written to the demo cache
    pub symbols: &'static [&'static str],
    pub period: Period,
    pub intervals: &'static [Interval],
}

pub const DEMO: DemoConfig = DemoConfig {
    symbols: &["AAPL", "MSFT", "TSLA", "NVDA", "AMZN"],
    period: Period::FiveDays,
    intervals: &[Interval::FiveMinutes, Interval::OneHour, Interval::OneDay],
};
