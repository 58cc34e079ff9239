// Domain types and value objects
pub mod market;
pub mod portfolio;
pub mod price_bar;
pub mod price_series;
pub mod trade_levels;

// Re-export commonly used types
pub use market::{Interval, Period, SeriesRange, SeriesRequest};
pub use portfolio::{Portfolio, PortfolioEntry, PositionValuation};
pub use price_bar::{CandleType, PriceBar};
pub use price_series::PriceSeries;
pub use trade_levels::{LevelKind, TradeLevels};
