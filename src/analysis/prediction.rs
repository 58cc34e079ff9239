//! Price-move prediction contract.
//!
//! No model ships with the app. `PredictionStub` fills the slot so the UI can
//! show a clear "not available" notice instead of made-up numbers.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::errors::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Direction {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub expected_move_pct: f64,
    pub direction: Direction,
    /// 0..=100
    pub confidence: f64,
}

impl Prediction {
    pub fn new(
        expected_move_pct: f64,
        direction: Direction,
        confidence: f64,
    ) -> Result<Self, PipelineError> {
        if !expected_move_pct.is_finite() {
            return Err(PipelineError::invalid("expected move must be finite"));
        }
        if !(0.0..=100.0).contains(&confidence) {
            return Err(PipelineError::invalid(format!(
                "confidence {} outside 0..=100",
                confidence
            )));
        }
        Ok(Self {
            expected_move_pct,
            direction,
            confidence,
        })
    }
}

pub trait PricePredictor: Send + Sync {
    fn predict(&self, ticker: &str) -> Result<Prediction, PipelineError>;

    /// False for placeholders whose output must not be presented as a forecast.
    fn is_authoritative(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionStub;

impl PricePredictor for PredictionStub {
    fn predict(&self, ticker: &str) -> Result<Prediction, PipelineError> {
        Err(PipelineError::PredictionUnavailable(format!(
            "No prediction model is configured for {}.",
            ticker
        )))
    }

    fn is_authoritative(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_is_not_authoritative_and_never_predicts() {
        let stub = PredictionStub;
        assert!(!stub.is_authoritative());
        match stub.predict("AAPL") {
            Err(PipelineError::PredictionUnavailable(msg)) => assert!(msg.contains("AAPL")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn confidence_is_bounded() {
        assert!(Prediction::new(1.5, Direction::Bullish, 100.0).is_ok());
        assert!(Prediction::new(1.5, Direction::Bearish, 100.5).is_err());
        assert!(Prediction::new(-2.0, Direction::Bearish, -1.0).is_err());
        assert!(Prediction::new(f64::NAN, Direction::Bullish, 50.0).is_err());
    }
}
