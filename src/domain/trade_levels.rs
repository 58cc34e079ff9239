use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::errors::PipelineError;

/// The three reference prices drawn on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum LevelKind {
    #[strum(serialize = "Entry Price")]
    Entry,
    #[strum(serialize = "Stop Loss")]
    StopLoss,
    #[strum(serialize = "Close Target")]
    Target,
}

impl LevelKind {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Entry Price" => Some(LevelKind::Entry),
            "Stop Loss" => Some(LevelKind::StopLoss),
            "Close Target" => Some(LevelKind::Target),
            _ => None,
        }
    }
}

/// Entry / stop-loss / target for a simulated long position.
///
/// Every price is finite and strictly positive. No ordering between them is
/// enforced: strongly negative sentiment can put the entry below the stop.
/// `is_conventional_long` reports whether the usual `stop < entry <= target` holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
}

impl TradeLevels {
    pub(crate) fn validated(entry: f64, stop_loss: f64, target: f64) -> Result<Self, PipelineError> {
        for (kind, value) in [
            (LevelKind::Entry, entry),
            (LevelKind::StopLoss, stop_loss),
            (LevelKind::Target, target),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PipelineError::invalid(format!(
                    "{} must be a positive price, got {}",
                    kind, value
                )));
            }
        }
        Ok(Self {
            entry,
            stop_loss,
            target,
        })
    }

    pub fn get(&self, kind: LevelKind) -> f64 {
        match kind {
            LevelKind::Entry => self.entry,
            LevelKind::StopLoss => self.stop_loss,
            LevelKind::Target => self.target,
        }
    }

    /// Distance from entry down to the stop. Negative when the stop sits above the entry.
    pub fn risk(&self) -> f64 {
        self.entry - self.stop_loss
    }

    /// Distance from entry up to the target. Negative when the target sits below the entry.
    pub fn reward(&self) -> f64 {
        self.target - self.entry
    }

    /// Reward per unit of risk, only meaningful while the stop is below the entry.
    pub fn risk_reward_ratio(&self) -> Option<f64> {
        let risk = self.risk();
        if risk <= 0.0 {
            return None;
        }
        Some(self.reward() / risk)
    }

    pub fn is_conventional_long(&self) -> bool {
        self.stop_loss < self.entry && self.entry <= self.target
    }

    /// Label → price map in chart legend order.
    pub fn as_level_map(&self) -> IndexMap<String, f64> {
        LevelKind::iter()
            .map(|kind| (kind.to_string(), self.get(kind)))
            .collect()
    }
}
