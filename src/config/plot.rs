//! Plot visualization configuration

use eframe::egui::Color32;

use crate::models::{DashPattern, LineStyleHint, Rgb};

/// Style hints attached to reference lines by the annotator
pub struct LevelStyles {
    pub entry: LineStyleHint,
    pub stop_loss: LineStyleHint,
    pub target: LineStyleHint,
    /// Any label that is not one of the three trade levels
    pub other: LineStyleHint,
}

pub const LEVEL_STYLES: LevelStyles = LevelStyles {
    entry: LineStyleHint {
        dash: DashPattern::Dashed,
        color: Rgb(0, 200, 0), // Green
    },
    stop_loss: LineStyleHint {
        dash: DashPattern::Dotted,
        color: Rgb(220, 0, 0), // Red
    },
    target: LineStyleHint {
        dash: DashPattern::Dashed,
        color: Rgb(30, 144, 255), // Dodger blue
    },
    other: LineStyleHint {
        dash: DashPattern::Solid,
        color: Rgb(255, 215, 0), // Gold
    },
};

pub struct PlotConfig {
    pub bullish_candle_color: Color32,
    pub bearish_candle_color: Color32,
    pub close_line_color: Color32,
    pub close_line_width: f32,
    /// Width of reference (entry/stop/target) lines
    pub level_line_width: f32,
    /// Candle body width as a fraction of one bar slot
    pub candle_width_fraction: f64,
    /// Headroom above/below the price bounds (fraction of the range)
    pub y_margin_fraction: f64,
    /// Maximum number of x-axis time labels
    pub x_axis_max_labels: usize,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    bullish_candle_color: Color32::from_rgb(38, 166, 154),
    bearish_candle_color: Color32::from_rgb(239, 83, 80),
    close_line_color: Color32::from_rgb(100, 200, 255),
    close_line_width: 2.0,
    level_line_width: 2.0,
    candle_width_fraction: 0.7,
    y_margin_fraction: 0.05,
    x_axis_max_labels: 8,
};
