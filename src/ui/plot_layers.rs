use eframe::egui::{Align2, Stroke};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, HLine, Line, LineStyle, PlotPoint, PlotPoints, PlotUi, Text};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::CandleType;
use crate::models::{ChartKind, ChartSpec, DashPattern};
use crate::ui::utils::{format_price, to_color32};

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub spec: &'a ChartSpec,
    /// Bars are drawn at x = 0, 1, 2, ... so market closures leave no gaps.
    pub x_min: f64,
    pub x_max: f64,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. CANDLE LAYER
// ============================================================================
pub struct CandleLayer;

impl PlotLayer for CandleLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.spec.kind() != ChartKind::Candlestick {
            return;
        }

        let (mut bullish, mut bearish) = (Vec::new(), Vec::new());
        for (i, bar) in ctx.spec.series().bars().iter().enumerate() {
            let Some((_, high, low, _)) = bar.ohlc() else {
                continue;
            };
            let (body_low, body_high) = bar.body_range();
            let (color, bucket) = match bar.get_type() {
                CandleType::Bullish => (PLOT_CONFIG.bullish_candle_color, &mut bullish),
                CandleType::Bearish => (PLOT_CONFIG.bearish_candle_color, &mut bearish),
            };

            // Box plot as candle: whiskers are the wicks, the box is the body.
            let spread = BoxSpread::new(low, body_low, bar.close, body_high, high);
            bucket.push(
                BoxElem::new(i as f64, spread)
                    .box_width(PLOT_CONFIG.candle_width_fraction)
                    .whisker_width(0.0)
                    .fill(color)
                    .stroke(Stroke::new(1.0, color)),
            );
        }

        plot_ui.box_plot(BoxPlot::new("Bullish", bullish).color(PLOT_CONFIG.bullish_candle_color));
        plot_ui.box_plot(BoxPlot::new("Bearish", bearish).color(PLOT_CONFIG.bearish_candle_color));
    }
}

// ============================================================================
// 2. CLOSE LINE LAYER (close-only series)
// ============================================================================
pub struct CloseLineLayer;

impl PlotLayer for CloseLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.spec.kind() != ChartKind::Line {
            return;
        }
        let points: Vec<[f64; 2]> = ctx
            .spec
            .series()
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| [i as f64, bar.close])
            .collect();

        plot_ui.line(
            Line::new("Close", PlotPoints::new(points))
                .color(PLOT_CONFIG.close_line_color)
                .width(PLOT_CONFIG.close_line_width),
        );
    }
}

// ============================================================================
// 3. REFERENCE LINE LAYER (entry / stop / target)
// ============================================================================
pub struct ReferenceLineLayer;

impl PlotLayer for ReferenceLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for line in ctx.spec.reference_lines() {
            let color = to_color32(line.style.color);
            plot_ui.hline(
                HLine::new(&line.label, line.price)
                    .color(color)
                    .width(PLOT_CONFIG.level_line_width)
                    .style(line_style(line.style.dash)),
            );

            // Label sits just above the line at the right-hand edge.
            let label = format!("{} {}", line.label, format_price(line.price));
            plot_ui.text(
                Text::new(&line.label, PlotPoint::new(ctx.x_max, line.price), label)
                    .color(color)
                    .anchor(Align2::RIGHT_BOTTOM),
            );
        }
    }
}

pub fn line_style(dash: DashPattern) -> LineStyle {
    match dash {
        DashPattern::Solid => LineStyle::Solid,
        DashPattern::Dashed => LineStyle::dashed_loose(),
        DashPattern::Dotted => LineStyle::dotted_dense(),
    }
}
