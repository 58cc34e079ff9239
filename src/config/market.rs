//! Market-data and headline provider configuration.

use crate::domain::{Interval, Period};

/// Yahoo Finance endpoints and client defaults
pub struct YahooEndpoints {
    pub base_url: &'static str,
    /// v8 chart endpoint, the symbol is appended
    pub chart_path: &'static str,
    pub search_path: &'static str,
    /// Yahoo rejects requests without a browser-ish user agent
    pub user_agent: &'static str,
}

/// HTTP client defaults
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

/// What the dashboard asks for when nothing has been chosen yet
pub struct RequestDefaults {
    pub symbol: &'static str,
    pub period: Period,
    pub interval: Interval,
    pub news_count: usize,
}

/// The Master Market Configuration
pub struct MarketConfig {
    pub yahoo: YahooEndpoints,
    pub client: ClientDefaults,
    pub defaults: RequestDefaults,
}

pub const MARKET: MarketConfig = MarketConfig {
    yahoo: YahooEndpoints {
        base_url: "https://query1.finance.yahoo.com",
        chart_path: "/v8/finance/chart/",
        search_path: "/v1/finance/search",
        user_agent: "Mozilla/5.0",
    },
    client: ClientDefaults {
        timeout_ms: 10_000,
        connect_timeout_ms: 5_000,
    },
    defaults: RequestDefaults {
        symbol: "AAPL",
        period: Period::OneDay,
        interval: Interval::FiveMinutes,
        news_count: 10,
    },
};
