// Trade-level pipeline stages
pub mod annotator;
pub mod prediction;
pub mod sentiment;
pub mod trade_levels;

// Re-export commonly used types
pub use annotator::{build_chart_spec, default_title};
pub use prediction::{Direction, Prediction, PredictionStub, PricePredictor};
pub use sentiment::{FinancialLexicon, PolarityModel, SentimentLevel, SentimentScore, SentimentScorer};
pub use trade_levels::{TradeLevelCalculator, derive_levels, levels_from_input};
