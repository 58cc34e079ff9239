use eframe::egui::{
    CentralPanel, Context, Frame, Grid, Margin, RichText, ScrollArea, SidePanel, TopBottomPanel, Ui,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::analysis::Prediction;
use crate::domain::PriceSeries;
use crate::engine::AnalysisOutcome;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    LevelsPanel, MarketEvent, MarketPanel, Panel, PortfolioEvent, PortfolioPanel,
};
use crate::ui::utils::{format_pct, format_price, format_volume, spaced_separator};
use crate::utils::time_utils::format_bar_time;

use super::app::TradeLevelsApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum CentralTab {
    #[default]
    Chart,
    Data,
}

impl CentralTab {
    fn title(&self) -> &'static str {
        match self {
            CentralTab::Chart => UI_TEXT.tab_chart,
            CentralTab::Data => UI_TEXT.tab_data,
        }
    }
}

impl TradeLevelsApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical().id_salt("side_panel").show(ui, |ui| {
                    let busy = self.is_calculating();
                    let market_events =
                        MarketPanel::new(&mut self.session.inputs, &mut self.date_buffers, busy)
                            .render(ui);

                    spaced_separator(ui);
                    let level_events = LevelsPanel::new(&mut self.session.inputs).render(ui);

                    spaced_separator(ui);
                    let valuations = self.session.valuations();
                    let total_cost = self.session.portfolio().total_cost();
                    let portfolio_notice = self.session.portfolio_notice();
                    let portfolio_events = PortfolioPanel::new(
                        &mut self.portfolio_form,
                        valuations,
                        total_cost,
                        portfolio_notice,
                    )
                    .render(ui);

                    for event in market_events {
                        match event {
                            MarketEvent::Generate => self.start_analysis(),
                            MarketEvent::InputsChanged => {
                                #[cfg(debug_assertions)]
                                if DEBUG_FLAGS.print_ui_interactions {
                                    log::info!("Inputs changed: {:?}", self.session.inputs);
                                }
                            }
                        }
                    }

                    for _mode in level_events {
                        #[cfg(debug_assertions)]
                        if DEBUG_FLAGS.print_ui_interactions {
                            log::info!("Level mode set to {}", _mode);
                        }
                    }

                    for event in portfolio_events {
                        match event {
                            PortfolioEvent::Add {
                                ticker,
                                buy_price,
                                quantity,
                            } => match self.session.add_position(&ticker, buy_price, quantity) {
                                Ok(()) => self.portfolio_form.ticker.clear(),
                                Err(e) => log::warn!("Position rejected: {}", e),
                            },
                        }
                    }
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(8));
        let busy = self.is_calculating();
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for tab in CentralTab::iter() {
                        ui.selectable_value(&mut self.central_tab, tab, tab.title());
                    }
                });
                ui.separator();

                // Failed analyses clear the outcome, so the notice takes the
                // chart's place.
                let notice = self.session.notice();
                let Some(outcome) = self.session.last_outcome() else {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        if busy {
                            ui.spinner();
                            ui.add_space(12.0);
                            ui.heading(UI_TEXT.generating);
                        } else if let Some(notice) = notice {
                            ui.label_error(notice);
                        } else {
                            ui.label_subdued(UI_TEXT.chart_placeholder);
                        }
                    });
                    return;
                };

                if !outcome.levels.is_conventional_long() {
                    ui.label_warning(UI_TEXT.crossed_levels_warning);
                }

                match self.central_tab {
                    CentralTab::Chart => self.plot_view.show(ui, &outcome.chart),
                    CentralTab::Data => render_data_table(ui, outcome.chart.series()),
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        let busy = self.is_calculating();
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if busy {
                        ui.spinner();
                        ui.label_subdued(UI_TEXT.generating);
                        return;
                    }
                    match self.session.last_outcome() {
                        Some(outcome) => render_outcome_status(ui, outcome),
                        None => ui.label_subdued(UI_TEXT.status_idle),
                    }
                });
            });
    }
}

fn render_outcome_status(ui: &mut Ui, outcome: &AnalysisOutcome) {
    ui.metric(
        UI_TEXT.status_source,
        &format!(
            "{} ({} ms)",
            outcome.source_signature,
            outcome.elapsed.as_millis()
        ),
        UI_CONFIG.colors.info,
    );
    ui.separator();

    match outcome.sentiment {
        Some(score) => {
            let color = if score.value() < 0.0 {
                UI_CONFIG.colors.loss
            } else {
                UI_CONFIG.colors.gain
            };
            ui.metric(
                UI_TEXT.status_sentiment,
                &format!(
                    "{:+.2} {} ({} headlines)",
                    score.value(),
                    score.level(),
                    outcome.headline_count
                ),
                color,
            );
        }
        None => ui.label_subdued(format!("{}: -", UI_TEXT.status_sentiment)),
    }
    ui.separator();

    let ratio = outcome
        .levels
        .risk_reward_ratio()
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "-".to_string());
    ui.metric(UI_TEXT.status_risk_reward, &ratio, UI_CONFIG.colors.label);
    ui.separator();

    let describe = |prediction: &Prediction| {
        format!(
            "{} {} ({:.0}%)",
            prediction.direction,
            format_pct(prediction.expected_move_pct),
            prediction.confidence
        )
    };
    match (&outcome.prediction, outcome.forecast()) {
        (_, Some(forecast)) => ui.metric(
            UI_TEXT.status_prediction,
            &describe(forecast),
            UI_CONFIG.colors.info,
        ),
        (Ok(placeholder), None) => {
            ui.label_subdued(format!("{}: {}", UI_TEXT.status_prediction, describe(placeholder)));
            ui.label_warning(UI_TEXT.prediction_placeholder);
        }
        (Err(e), None) => ui.label_subdued(e.user_notice()),
    }
}

fn render_data_table(ui: &mut Ui, series: &PriceSeries) {
    let interval_ms = series.interval().duration_ms();
    let optional_price = |value: Option<f64>| value.map(format_price).unwrap_or_else(|| "-".into());

    ScrollArea::vertical()
        .max_height(UI_CONFIG.data_table_max_height)
        .id_salt("data_table")
        .show(ui, |ui| {
            Grid::new("ohlcv_grid")
                .striped(true)
                .num_columns(UI_TEXT.data_columns.len())
                .show(ui, |ui| {
                    for column in UI_TEXT.data_columns {
                        ui.label(RichText::new(column).strong());
                    }
                    ui.end_row();

                    // Newest first
                    for bar in series.bars().iter().rev() {
                        ui.label(format_bar_time(&bar.timestamp, interval_ms));
                        ui.label(optional_price(bar.open));
                        ui.label(optional_price(bar.high));
                        ui.label(optional_price(bar.low));
                        ui.label(format_price(bar.close));
                        ui.label(bar.volume.map(format_volume).unwrap_or_else(|| "-".into()));
                        ui.end_row();
                    }
                });
        });
}
