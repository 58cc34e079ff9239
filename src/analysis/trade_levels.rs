use crate::analysis::sentiment::SentimentScore;
use crate::config::{TRADE_LEVELS, TradeLevelParams};
use crate::domain::TradeLevels;
use crate::errors::PipelineError;
use crate::utils::maths_utils::round_to_decimals;

/// Turns a reference price and a sentiment score into entry/stop/target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeLevelCalculator {
    params: TradeLevelParams,
}

impl TradeLevelCalculator {
    pub fn new(params: TradeLevelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TradeLevelParams {
        &self.params
    }

    /// Formula-derived levels, each rounded to cents.
    ///
    /// The stop depends on the price alone. Entry and target can cross the stop
    /// for strongly negative sentiment; that is reported, not corrected.
    pub fn derive_levels(
        &self,
        reference_price: f64,
        sentiment: SentimentScore,
    ) -> Result<TradeLevels, PipelineError> {
        // Reject before any arithmetic so nothing downstream divides by zero.
        if !reference_price.is_finite() || reference_price <= 0.0 {
            return Err(PipelineError::invalid(format!(
                "reference price must be positive, got {}",
                reference_price
            )));
        }

        let s = sentiment.value();
        let p = &self.params;
        let entry = reference_price * (1.0 + s * p.entry_sentiment_factor);
        let stop_loss = reference_price * p.stop_loss_ratio;
        let target = reference_price * (1.0 + s.abs() * p.target_sentiment_factor);

        let levels = TradeLevels::validated(
            round_to_decimals(entry, p.decimals),
            round_to_decimals(stop_loss, p.decimals),
            round_to_decimals(target, p.decimals),
        )?;

        if !levels.is_conventional_long() {
            log::warn!(
                "Derived levels are not ordered stop < entry <= target: {:?} (sentiment {:+.3})",
                levels,
                s
            );
        }
        Ok(levels)
    }
}

/// `TradeLevelCalculator::derive_levels` with the default constants.
pub fn derive_levels(
    reference_price: f64,
    sentiment: SentimentScore,
) -> Result<TradeLevels, PipelineError> {
    TradeLevelCalculator::new(TRADE_LEVELS).derive_levels(reference_price, sentiment)
}

/// Manual path: validates user-entered prices and passes them through unchanged.
pub fn levels_from_input(
    entry: f64,
    stop_loss: f64,
    target: f64,
) -> Result<TradeLevels, PipelineError> {
    TradeLevels::validated(entry, stop_loss, target)
}
