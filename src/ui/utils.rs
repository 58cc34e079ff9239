use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::models::Rgb;
use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase() + ":";
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Stock prices: cents, with extra precision for penny stocks.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "-".to_string();
    }
    let abs_price = price.abs();
    if abs_price > 0.0 && abs_price < 1.0 {
        format!("${:.4}", price)
    } else {
        format!("${:.2}", price)
    }
}

pub fn format_signed_price(value: f64) -> String {
    if value < 0.0 {
        format!("-{}", format_price(-value))
    } else {
        format!("+{}", format_price(value))
    }
}

pub fn format_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Volume with K/M/B suffixes.
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1e9 {
        format!("{:.2}B", volume / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", volume / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{:.0}", volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_show_cents() {
        assert_eq!(format_price(150.0), "$150.00");
        assert_eq!(format_price(1234.567), "$1234.57");
        assert_eq!(format_price(0.4567), "$0.4567");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(f64::NAN), "-");
    }

    #[test]
    fn signed_values_and_percentages() {
        assert_eq!(format_signed_price(-12.5), "-$12.50");
        assert_eq!(format_signed_price(3.0), "+$3.00");
        assert_eq!(format_pct(50.0), "+50.00%");
        assert_eq!(format_pct(-1.234), "-1.23%");
    }

    #[test]
    fn volume_suffixes() {
        assert_eq!(format_volume(950.0), "950");
        assert_eq!(format_volume(12_300.0), "12.3K");
        assert_eq!(format_volume(45_670_000.0), "45.67M");
        assert_eq!(format_volume(2_100_000_000.0), "2.10B");
    }
}
