use chrono::NaiveDate;
use eframe::egui::{Button, ComboBox, DragValue, Grid, ScrollArea, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::domain::{Interval, Period, PositionValuation};
use crate::engine::{LevelMode, RangeMode, SessionInputs};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{
    colored_subsection_heading, format_pct, format_price, format_signed_price, section_heading,
};
use crate::utils::TimeUtils;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Text buffers behind the date fields, parsed on every edit.
#[derive(Debug, Clone, Default)]
pub struct DateBuffers {
    pub start: String,
    pub end: String,
}

impl DateBuffers {
    pub fn from_inputs(inputs: &SessionInputs) -> Self {
        Self {
            start: inputs.start_date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
            end: inputs.end_date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        }
    }
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), TimeUtils::STANDARD_TIME_FORMAT).ok()
}

#[derive(Debug, PartialEq)]
pub enum MarketEvent {
    Generate,
    InputsChanged,
}

/// Ticker, range, interval and the Generate button
pub struct MarketPanel<'a> {
    inputs: &'a mut SessionInputs,
    dates: &'a mut DateBuffers,
    busy: bool,
}

impl<'a> MarketPanel<'a> {
    pub fn new(inputs: &'a mut SessionInputs, dates: &'a mut DateBuffers, busy: bool) -> Self {
        Self {
            inputs,
            dates,
            busy,
        }
    }

    fn render_date_field(ui: &mut Ui, label: &str, buffer: &mut String, target: &mut NaiveDate) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label_subdued(label);
            let response = ui.add(
                TextEdit::singleline(buffer)
                    .hint_text(UI_TEXT.date_hint)
                    .desired_width(90.0),
            );
            if response.changed() {
                if let Some(date) = parse_date(buffer) {
                    *target = date;
                    changed = true;
                }
            }
            if parse_date(buffer).is_none() {
                ui.label_warning("?");
            }
        });
        changed
    }

    fn render_range(&mut self, ui: &mut Ui) -> bool {
        let mut changed = false;
        ui.label(colored_subsection_heading(UI_TEXT.range_label));
        ui.horizontal(|ui| {
            for mode in RangeMode::iter() {
                changed |= ui
                    .selectable_value(&mut self.inputs.range_mode, mode, mode.to_string())
                    .changed();
            }
        });

        match self.inputs.range_mode {
            RangeMode::Period => {
                ComboBox::from_label(UI_TEXT.period_label)
                    .selected_text(self.inputs.period.to_string())
                    .show_ui(ui, |ui| {
                        for period in Period::iter() {
                            changed |= ui
                                .selectable_value(&mut self.inputs.period, period, period.to_string())
                                .changed();
                        }
                    });
            }
            RangeMode::Dates => {
                changed |= Self::render_date_field(
                    ui,
                    UI_TEXT.start_date_label,
                    &mut self.dates.start,
                    &mut self.inputs.start_date,
                );
                changed |= Self::render_date_field(
                    ui,
                    UI_TEXT.end_date_label,
                    &mut self.dates.end,
                    &mut self.inputs.end_date,
                );
            }
        }
        changed
    }
}

impl<'a> Panel for MarketPanel<'a> {
    type Event = MarketEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        let mut changed = false;
        section_heading(ui, UI_TEXT.market_heading);

        ui.label(colored_subsection_heading(UI_TEXT.ticker_label));
        let ticker_response = ui.add(TextEdit::singleline(&mut self.inputs.ticker).desired_width(120.0));
        changed |= ticker_response.changed();
        let submitted = ticker_response.lost_focus()
            && ui.input(|i| i.key_pressed(eframe::egui::Key::Enter));

        ui.add_space(5.0);
        changed |= self.render_range(ui);

        ui.add_space(5.0);
        ComboBox::from_label(UI_TEXT.interval_label)
            .selected_text(self.inputs.interval.to_string())
            .show_ui(ui, |ui| {
                for interval in Interval::iter() {
                    changed |= ui
                        .selectable_value(&mut self.inputs.interval, interval, interval.to_string())
                        .changed();
                }
            });

        changed |= ui
            .checkbox(&mut self.inputs.use_headlines, UI_TEXT.headlines_toggle)
            .changed();

        ui.add_space(8.0);
        let button_text = if self.busy {
            UI_TEXT.generating
        } else {
            UI_TEXT.generate_button
        };
        let clicked = ui.add_enabled(!self.busy, Button::new(button_text)).clicked();
        if clicked || (submitted && !self.busy) {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Generate requested for '{}'", self.inputs.ticker);
            }
            events.push(MarketEvent::Generate);
        }
        if changed {
            events.push(MarketEvent::InputsChanged);
        }
        events
    }
}

/// Manual entry/stop/target or sentiment-derived levels
pub struct LevelsPanel<'a> {
    inputs: &'a mut SessionInputs,
}

impl<'a> LevelsPanel<'a> {
    pub fn new(inputs: &'a mut SessionInputs) -> Self {
        Self { inputs }
    }

    fn price_field(ui: &mut Ui, label: &str, value: &mut f64) {
        ui.label_subdued(label);
        ui.add(
            DragValue::new(value)
                .speed(0.05)
                .prefix("$")
                .min_decimals(2)
                .max_decimals(2),
        );
        ui.end_row();
    }
}

impl<'a> Panel for LevelsPanel<'a> {
    type Event = LevelMode;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.levels_heading);

        ui.horizontal(|ui| {
            ui.label_subdued(UI_TEXT.level_mode_label);
            for mode in LevelMode::iter() {
                if ui
                    .selectable_value(&mut self.inputs.level_mode, mode, mode.to_string())
                    .clicked()
                {
                    events.push(mode);
                }
            }
        });

        match self.inputs.level_mode {
            LevelMode::Manual => {
                Grid::new("manual_levels").num_columns(2).show(ui, |ui| {
                    Self::price_field(ui, "Entry Price", &mut self.inputs.manual_entry);
                    Self::price_field(ui, "Stop Loss", &mut self.inputs.manual_stop_loss);
                    Self::price_field(ui, "Close Target", &mut self.inputs.manual_target);
                });
            }
            LevelMode::Sentiment => {
                ui.label_subdued(UI_TEXT.sentiment_mode_helper);
            }
        }
        events
    }
}

/// Portfolio form state. Lives with the app, not the session, and is not persisted.
#[derive(Debug, Clone)]
pub struct PortfolioForm {
    pub ticker: String,
    pub buy_price: f64,
    pub quantity: f64,
}

impl Default for PortfolioForm {
    fn default() -> Self {
        Self {
            ticker: String::new(),
            buy_price: 0.0,
            quantity: 1.0,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PortfolioEvent {
    Add {
        ticker: String,
        buy_price: f64,
        quantity: f64,
    },
}

pub struct PortfolioPanel<'a> {
    form: &'a mut PortfolioForm,
    valuations: Vec<PositionValuation>,
    total_cost: f64,
    notice: Option<String>,
}

impl<'a> PortfolioPanel<'a> {
    pub fn new(
        form: &'a mut PortfolioForm,
        valuations: Vec<PositionValuation>,
        total_cost: f64,
        notice: Option<String>,
    ) -> Self {
        Self {
            form,
            valuations,
            total_cost,
            notice,
        }
    }

    fn render_table(&self, ui: &mut Ui) {
        if self.valuations.is_empty() {
            ui.label_subdued(UI_TEXT.portfolio_empty);
            return;
        }

        ScrollArea::vertical()
            .max_height(UI_CONFIG.portfolio_table_max_height)
            .id_salt("portfolio_table")
            .show(ui, |ui| {
                Grid::new("portfolio_grid").striped(true).show(ui, |ui| {
                    for column in UI_TEXT.portfolio_columns {
                        ui.label_subdued(column);
                    }
                    ui.end_row();

                    for v in &self.valuations {
                        ui.label(v.entry.ticker.as_str());
                        ui.label(format!("{}", v.entry.quantity));
                        ui.label(format_price(v.entry.buy_price));
                        ui.label(v.last_price.map(format_price).unwrap_or_else(|| "-".into()));
                        ui.label(v.market_value.map(format_price).unwrap_or_else(|| "-".into()));
                        match (v.unrealized_pnl, v.pnl_pct) {
                            (Some(pnl), Some(pct)) => ui.label_signed(
                                pnl,
                                format!("{} ({})", format_signed_price(pnl), format_pct(pct)),
                            ),
                            _ => ui.label_subdued("-"),
                        }
                        ui.end_row();
                    }
                });
            });

        ui.metric(
            UI_TEXT.portfolio_total_cost,
            &format_price(self.total_cost),
            UI_CONFIG.colors.info,
        );
    }
}

impl<'a> Panel for PortfolioPanel<'a> {
    type Event = PortfolioEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.portfolio_heading);

        Grid::new("portfolio_form").num_columns(2).show(ui, |ui| {
            ui.label_subdued(UI_TEXT.portfolio_ticker);
            ui.add(TextEdit::singleline(&mut self.form.ticker).desired_width(80.0));
            ui.end_row();

            ui.label_subdued(UI_TEXT.portfolio_buy_price);
            ui.add(DragValue::new(&mut self.form.buy_price).speed(0.05).prefix("$").max_decimals(2));
            ui.end_row();

            ui.label_subdued(UI_TEXT.portfolio_quantity);
            ui.add(DragValue::new(&mut self.form.quantity).speed(1.0));
            ui.end_row();
        });

        if ui.button(UI_TEXT.portfolio_add_button).clicked() {
            events.push(PortfolioEvent::Add {
                ticker: self.form.ticker.clone(),
                buy_price: self.form.buy_price,
                quantity: self.form.quantity,
            });
        }

        if let Some(notice) = &self.notice {
            ui.label_error(notice.as_str());
        }

        ui.add_space(5.0);
        self.render_table(ui);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_in_the_display_format() {
        assert_eq!(parse_date(" 2024-03-01 "), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_date("03/01/2024"), None);
    }

    #[test]
    fn buffers_mirror_the_inputs() {
        let mut inputs = SessionInputs::default();
        inputs.start_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        inputs.end_date = NaiveDate::from_ymd_opt(2024, 2, 3).unwrap();
        let buffers = DateBuffers::from_inputs(&inputs);
        assert_eq!(buffers.start, "2024-01-02");
        assert_eq!(buffers.end, "2024-02-03");
    }
}
