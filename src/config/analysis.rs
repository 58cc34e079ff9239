//! Trade-level and sentiment configuration

/// Constants of the sentiment-driven level formula.
///
/// entry  = price * (1 + sentiment * entry_sentiment_factor)
/// stop   = price * stop_loss_ratio
/// target = price * (1 + |sentiment| * target_sentiment_factor)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeLevelParams {
    pub entry_sentiment_factor: f64,
    pub stop_loss_ratio: f64,
    pub target_sentiment_factor: f64,
    /// Currency-style rounding applied to every derived level
    pub decimals: u32,
}

impl Default for TradeLevelParams {
    fn default() -> Self {
        TRADE_LEVELS
    }
}

pub const TRADE_LEVELS: TradeLevelParams = TradeLevelParams {
    entry_sentiment_factor: 0.01,
    stop_loss_ratio: 0.98,
    target_sentiment_factor: 0.02,
    decimals: 2,
};

/// Settings for headline scoring
pub struct SentimentSettings {
    // |score| at or below this is reported as Neutral
    pub neutral_band: f64,
    // Upper bound on headlines scored per request
    pub max_headlines: usize,
}

pub const SENTIMENT: SentimentSettings = SentimentSettings {
    neutral_band: 0.05,
    max_headlines: 20,
};
