//! Configuration module for the trade-levels application.

pub mod analysis;
pub mod market;

mod debug; // Private: files use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use analysis::{SENTIMENT, SentimentSettings, TRADE_LEVELS, TradeLevelParams};
pub use demo::DEMO;
pub use market::{MARKET, MarketConfig};
pub use persistence::{APP_STATE_PATH, PERSISTENCE, series_cache_filename};
