use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Semantic styling helpers on `egui::Ui`.
pub trait UiStyleExt {
    /// Small grey text for captions and helper lines.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// "Label: Value" with a subdued label and a coloured value.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    /// Red, full-size. Used for pipeline notices.
    fn label_error(&mut self, text: impl Into<String>);

    fn label_warning(&mut self, text: impl Into<String>);

    /// Signed money or percentage, green when positive and red when negative.
    fn label_signed(&mut self, value: f64, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.loss));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(255, 215, 0)));
    }

    fn label_signed(&mut self, value: f64, text: impl Into<String>) {
        let color = if value < 0.0 {
            UI_CONFIG.colors.loss
        } else {
            UI_CONFIG.colors.gain
        };
        self.label(RichText::new(text).color(color));
    }
}
