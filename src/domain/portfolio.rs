use std::collections::HashMap;

use crate::domain::market::normalise_ticker;
use crate::errors::PipelineError;
use crate::utils::maths_utils;

/// A manually entered position.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    pub ticker: String,
    pub buy_price: f64,
    pub quantity: f64,
}

impl PortfolioEntry {
    pub fn cost(&self) -> f64 {
        self.buy_price * self.quantity
    }
}

/// Mark-to-market view of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionValuation {
    pub entry: PortfolioEntry,
    pub last_price: Option<f64>,
    pub market_value: Option<f64>,
    pub unrealized_pnl: Option<f64>,
    pub pnl_pct: Option<f64>,
}

/// Append-only list of positions for one session. Never written to disk.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        ticker: &str,
        buy_price: f64,
        quantity: f64,
    ) -> Result<&PortfolioEntry, PipelineError> {
        let ticker = normalise_ticker(ticker)?;
        if !buy_price.is_finite() || buy_price <= 0.0 {
            return Err(PipelineError::invalid(format!(
                "buy price must be positive, got {}",
                buy_price
            )));
        }
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(PipelineError::invalid(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }

        self.entries.push(PortfolioEntry {
            ticker,
            buy_price,
            quantity,
        });
        log::info!("Portfolio now holds {} entries", self.entries.len());

        // Just pushed, so there is a last element.
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.entries.iter().map(PortfolioEntry::cost).sum()
    }

    /// Values each entry against `last_prices` (keyed by upper-case ticker).
    pub fn valuations(&self, last_prices: &HashMap<String, f64>) -> Vec<PositionValuation> {
        self.entries
            .iter()
            .map(|entry| {
                let last_price = last_prices.get(&entry.ticker).copied();
                let market_value = last_price.map(|price| price * entry.quantity);
                let unrealized_pnl = market_value.map(|value| value - entry.cost());
                let pnl_pct = last_price.and_then(|price| maths_utils::pct_change(entry.buy_price, price));
                PositionValuation {
                    entry: entry.clone(),
                    last_price,
                    market_value,
                    unrealized_pnl,
                    pnl_pct,
                }
            })
            .collect()
    }
}
