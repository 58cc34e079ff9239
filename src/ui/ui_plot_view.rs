use std::hash::{DefaultHasher, Hash, Hasher};

use eframe::egui;
use egui_plot::{AxisHints, Corner, GridMark, HPlacement, Legend, Plot};

use crate::config::plot::PLOT_CONFIG;
use crate::models::ChartSpec;
use crate::ui::plot_layers::{
    CandleLayer, CloseLineLayer, LayerContext, PlotLayer, ReferenceLineLayer,
};
use crate::utils::time_utils::format_bar_time;

/// Derived geometry for one chart. Rebuilt only when the ChartSpec changes.
#[derive(Clone)]
pub struct PlotCache {
    pub spec_hash: u64,
    /// Axis label per bar index
    pub x_labels: Vec<String>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Default)]
pub struct PlotView {
    cache: Option<PlotCache>,
}

fn spec_hash(spec: &ChartSpec) -> u64 {
    let mut hasher = DefaultHasher::new();
    let series = spec.series();
    series.symbol().hash(&mut hasher);
    series.interval().hash(&mut hasher);
    series.len().hash(&mut hasher);
    series.first_timestamp().hash(&mut hasher);
    series.last_timestamp().hash(&mut hasher);
    series.last_close().map(f64::to_bits).hash(&mut hasher);
    for line in spec.reference_lines() {
        line.label.hash(&mut hasher);
        line.price.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Pads the y-range so candles and level labels do not touch the frame.
/// A flat range (single bar, levels equal to the price) still gets height.
pub fn padded_bounds(min: f64, max: f64, margin_fraction: f64) -> (f64, f64) {
    let range = max - min;
    let pad = if range > 0.0 {
        range * margin_fraction
    } else {
        (min.abs() * margin_fraction).max(1.0)
    };
    (min - pad, max + pad)
}

/// Integer grid marks, at most `max_labels` of them, for bar-index x values.
fn index_grid_marks(bounds: (f64, f64), max_labels: usize) -> Vec<GridMark> {
    let (min, max) = bounds;
    let span = (max - min).max(1.0);
    let step = (span / max_labels.max(1) as f64).ceil().max(1.0);
    let start = (min / step).ceil() as i64;
    let end = (max / step).floor() as i64;
    (start..=end)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}

impl PlotView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    pub fn clear_cache(&mut self) {
        self.cache = None;
    }

    fn plot_cache(&mut self, spec: &ChartSpec) -> PlotCache {
        let current_hash = spec_hash(spec);
        if let Some(cache) = &self.cache {
            if cache.spec_hash == current_hash {
                return cache.clone();
            }
        }

        let series = spec.series();
        let interval_ms = series.interval().duration_ms();
        let x_labels = series
            .bars()
            .iter()
            .map(|bar| format_bar_time(&bar.timestamp, interval_ms))
            .collect();

        let (low, high) = spec.price_bounds();
        let (y_min, y_max) = padded_bounds(low, high, PLOT_CONFIG.y_margin_fraction);

        let cache = PlotCache {
            spec_hash: current_hash,
            x_labels,
            // Half a slot either side so the first and last candle are not clipped.
            x_min: -0.5,
            x_max: series.len() as f64 - 0.5,
            y_min,
            y_max,
        };
        self.cache = Some(cache.clone());
        cache
    }

    pub fn show(&mut self, ui: &mut egui::Ui, spec: &ChartSpec) {
        let cache = self.plot_cache(spec);

        ui.vertical_centered(|ui| {
            ui.heading(spec.title());
        });

        Plot::new("price_chart")
            .legend(Legend::default().position(Corner::LeftTop))
            .custom_x_axes(vec![create_x_axis(&spec.axis_labels().x, &cache)])
            .custom_y_axes(vec![create_y_axis(&spec.axis_labels().y)])
            .x_grid_spacer(|input| index_grid_marks(input.bounds, PLOT_CONFIG.x_axis_max_labels))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("${:.2}", value.y)
                } else {
                    format!("{}\n${:.2}", name, value.y)
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(cache.x_min..=cache.x_max);
                plot_ui.set_plot_bounds_y(cache.y_min..=cache.y_max);

                let ctx = LayerContext {
                    spec,
                    x_min: cache.x_min,
                    x_max: cache.x_max,
                };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(CandleLayer),
                    Box::new(CloseLineLayer),
                    Box::new(ReferenceLineLayer),
                ];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
    }
}

fn create_x_axis(label: &str, cache: &PlotCache) -> AxisHints<'static> {
    let labels = cache.x_labels.clone();
    AxisHints::new_x()
        .label(label.to_string())
        .formatter(move |grid_mark, _range| {
            let index = grid_mark.value.round();
            if index < 0.0 {
                return String::new();
            }
            labels.get(index as usize).cloned().unwrap_or_default()
        })
}

fn create_y_axis(label: &str) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(label.to_string())
        .formatter(|grid_mark, _range| format!("${:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_scales_with_range() {
        assert_eq!(padded_bounds(100.0, 200.0, 0.05), (95.0, 205.0));
    }

    #[test]
    fn flat_range_still_gets_height() {
        let (lo, hi) = padded_bounds(150.0, 150.0, 0.05);
        assert!(lo < 150.0 && hi > 150.0);
    }

    #[test]
    fn grid_marks_are_whole_bars_and_capped() {
        let marks = index_grid_marks((-0.5, 99.5), 8);
        assert!(marks.len() <= 9);
        assert!(marks.iter().all(|m| m.value.fract() == 0.0));
        assert_eq!(marks[0].value, 0.0);
    }
}
