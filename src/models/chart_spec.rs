//! Renderer-agnostic description of an annotated price chart.
//!
//! Nothing in here knows about egui. A `ChartSpec` can be drawn as candles
//! (when every bar has OHLC) or as a close-price line, with one horizontal
//! marker per reference level.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::PriceSeries;
use crate::utils::maths_utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashPattern {
    Solid,
    Dashed,
    Dotted,
}

/// Presentational hint only. Renderers may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyleHint {
    pub dash: DashPattern,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub price: f64,
    pub style: LineStyleHint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x: "Time".to_string(),
            y: "Price".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Candlestick,
    Line,
}

impl ChartKind {
    pub fn for_series(series: &PriceSeries) -> Self {
        if series.has_full_ohlc() {
            ChartKind::Candlestick
        } else {
            ChartKind::Line
        }
    }
}

/// Built by `analysis::annotator::build_chart_spec`, which guarantees a non-empty series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    series: PriceSeries,
    levels: IndexMap<String, f64>,
    reference_lines: Vec<ReferenceLine>,
    title: String,
    axis_labels: AxisLabels,
    kind: ChartKind,
}

impl ChartSpec {
    pub(crate) fn from_parts(
        series: PriceSeries,
        levels: IndexMap<String, f64>,
        reference_lines: Vec<ReferenceLine>,
        title: String,
        axis_labels: AxisLabels,
    ) -> Self {
        let kind = ChartKind::for_series(&series);
        Self {
            series,
            levels,
            reference_lines,
            title,
            axis_labels,
            kind,
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn levels(&self) -> &IndexMap<String, f64> {
        &self.levels
    }

    pub fn reference_lines(&self) -> &[ReferenceLine] {
        &self.reference_lines
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn axis_labels(&self) -> &AxisLabels {
        &self.axis_labels
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// y-range covering every bar and every reference line, so no marker is clipped.
    pub fn price_bounds(&self) -> (f64, f64) {
        let mut prices: Vec<f64> = Vec::with_capacity(self.series.len() * 2 + self.levels.len());
        for bar in self.series.bars() {
            let (low, high) = bar.price_extent();
            prices.push(low);
            prices.push(high);
        }
        prices.extend(self.levels.values().copied());

        maths_utils::get_min_max(&prices).unwrap_or_default()
    }
}
