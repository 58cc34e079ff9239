use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub gain: Color32,
    pub loss: Color32,
    pub info: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    /// Rows shown in the Data tab before scrolling
    pub data_table_max_height: f32,
    pub portfolio_table_max_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,     // This sets every label globally to this color
        heading: Color32::YELLOW, // Sets every heading
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 24, 32),
        side_panel: Color32::from_rgb(25, 25, 25),
        gain: Color32::from_rgb(130, 200, 140),
        loss: Color32::from_rgb(239, 83, 80),
        info: Color32::from_rgb(100, 200, 255),
    },
    side_panel_min_width: 220.0,
    data_table_max_height: 600.0,
    portfolio_table_max_height: 220.0,
};
