use indexmap::IndexMap;

use crate::config::plot::LEVEL_STYLES;
use crate::domain::{LevelKind, PriceSeries};
use crate::errors::PipelineError;
use crate::models::{AxisLabels, ChartSpec, LineStyleHint, ReferenceLine};

/// Default chart title for a symbol.
pub fn default_title(symbol: &str) -> String {
    format!("{} Entry and Stop Loss Chart", symbol)
}

/// Conventional look for the three trade levels; anything else gets a neutral line.
pub fn style_for_label(label: &str) -> LineStyleHint {
    match LevelKind::from_label(label) {
        Some(LevelKind::Entry) => LEVEL_STYLES.entry,
        Some(LevelKind::StopLoss) => LEVEL_STYLES.stop_loss,
        Some(LevelKind::Target) => LEVEL_STYLES.target,
        None => LEVEL_STYLES.other,
    }
}

/// Combines a price series and named reference prices into a chart description.
///
/// Refuses an empty series (callers show a "no data" notice instead of an empty
/// chart) and any non-finite level price.
pub fn build_chart_spec(
    series: PriceSeries,
    levels: &IndexMap<String, f64>,
    title: impl Into<String>,
    axis_labels: AxisLabels,
) -> Result<ChartSpec, PipelineError> {
    if series.is_empty() {
        return Err(PipelineError::empty_series(series.symbol()));
    }

    let mut reference_lines = Vec::with_capacity(levels.len());
    for (label, &price) in levels {
        if !price.is_finite() {
            return Err(PipelineError::invalid(format!(
                "level '{}' has a non-finite price",
                label
            )));
        }
        reference_lines.push(ReferenceLine {
            label: label.clone(),
            price,
            style: style_for_label(label),
        });
    }

    Ok(ChartSpec::from_parts(
        series,
        levels.clone(),
        reference_lines,
        title.into(),
        axis_labels,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Interval, PriceBar, TradeLevels};
    use crate::models::{ChartKind, DashPattern};
    use chrono::{Duration, TimeZone, Utc};

    fn series(bars: usize, full_ohlc: bool) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();
        let bars = (0..bars)
            .map(|i| {
                let ts = start + Duration::minutes(5 * i as i64);
                let close = 150.0 + i as f64;
                if full_ohlc {
                    PriceBar::new(ts, close - 0.5, close + 1.0, close - 1.0, close, Some(10.0))
                } else {
                    PriceBar::close_only(ts, close)
                }
            })
            .collect();
        PriceSeries::new("AAPL", Interval::FiveMinutes, bars).unwrap()
    }

    fn trade_levels() -> IndexMap<String, f64> {
        TradeLevels {
            entry: 150.0,
            stop_loss: 145.0,
            target: 155.0,
        }
        .as_level_map()
    }

    #[test]
    fn empty_series_is_refused() {
        let empty = PriceSeries::empty("AAPL", Interval::OneDay);
        let result = build_chart_spec(empty, &trade_levels(), "t", AxisLabels::default());
        assert_eq!(result, Err(PipelineError::empty_series("AAPL")));
    }

    #[test]
    fn one_reference_line_per_level_in_order() {
        let spec = build_chart_spec(
            series(3, true),
            &trade_levels(),
            default_title("AAPL"),
            AxisLabels::default(),
        )
        .unwrap();

        let labels: Vec<&str> = spec.reference_lines().iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Entry Price", "Stop Loss", "Close Target"]);
        assert_eq!(spec.reference_lines()[1].price, 145.0);
        assert_eq!(spec.reference_lines()[1].style.dash, DashPattern::Dotted);
        assert_eq!(spec.title(), "AAPL Entry and Stop Loss Chart");
        assert_eq!(spec.axis_labels().x, "Time");
        assert_eq!(spec.series().len(), 3);
    }

    #[test]
    fn chart_kind_follows_populated_fields() {
        let candles = build_chart_spec(series(2, true), &IndexMap::new(), "c", AxisLabels::default());
        assert_eq!(candles.unwrap().kind(), ChartKind::Candlestick);

        let line = build_chart_spec(series(2, false), &IndexMap::new(), "l", AxisLabels::default());
        assert_eq!(line.unwrap().kind(), ChartKind::Line);
    }

    #[test]
    fn custom_labels_get_the_neutral_style() {
        let mut levels = IndexMap::new();
        levels.insert("Support".to_string(), 149.0);
        let spec = build_chart_spec(series(2, true), &levels, "s", AxisLabels::default()).unwrap();
        assert_eq!(spec.reference_lines()[0].style, LEVEL_STYLES.other);
    }

    #[test]
    fn non_finite_level_is_refused() {
        let mut levels = trade_levels();
        levels.insert("Broken".to_string(), f64::NAN);
        let result = build_chart_spec(series(2, true), &levels, "t", AxisLabels::default());
        assert!(matches!(result, Err(PipelineError::InvalidInput(_))));
    }

    #[test]
    fn price_bounds_include_levels_outside_the_bars() {
        // Bars span 149.0..=152.0; the stop at 145 and target at 155 widen the range.
        let spec = build_chart_spec(series(2, true), &trade_levels(), "t", AxisLabels::default())
            .unwrap();
        assert_eq!(spec.price_bounds(), (145.0, 155.0));
    }
}
