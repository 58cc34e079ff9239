use std::sync::Arc;

use eframe::{Frame, egui};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::Cli;
use crate::engine::{AnalysisOutcome, SessionContext, TradePipeline};
use crate::errors::PipelineError;
use crate::ui::ui_panels::{DateBuffers, PortfolioForm};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::ui_render::CentralTab;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// The dashboard. Persisted fields are the session inputs and the open tab;
/// everything else is rebuilt on start.
#[derive(Deserialize, Serialize)]
pub struct TradeLevelsApp {
    #[serde(default)]
    pub(super) session: SessionContext,
    #[serde(default)]
    pub(super) central_tab: CentralTab,

    #[serde(skip)]
    pub(super) pipeline: Option<Arc<TradePipeline>>,
    #[serde(skip)]
    pub(super) runtime: Option<tokio::runtime::Handle>,
    #[serde(skip)]
    pub(super) analysis_promise: Option<Promise<Result<AnalysisOutcome, PipelineError>>>,
    #[serde(skip)]
    pub(super) plot_view: PlotView,
    #[serde(skip)]
    pub(super) date_buffers: DateBuffers,
    #[serde(skip)]
    pub(super) portfolio_form: PortfolioForm,
}

impl Default for TradeLevelsApp {
    fn default() -> Self {
        let session = SessionContext::new();
        let date_buffers = DateBuffers::from_inputs(&session.inputs);
        Self {
            session,
            central_tab: CentralTab::default(),
            pipeline: None,
            runtime: None,
            analysis_promise: None,
            plot_view: PlotView::new(),
            date_buffers,
            portfolio_form: PortfolioForm::default(),
        }
    }
}

impl TradeLevelsApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        pipeline: Arc<TradePipeline>,
        runtime: tokio::runtime::Handle,
        args: &Cli,
    ) -> Self {
        let mut app: TradeLevelsApp = match cc.storage {
            Some(storage) => match eframe::get_value(storage, eframe::APP_KEY) {
                Some(value) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_state_serde {
                        log::info!("Successfully loaded persisted state");
                    }
                    value
                }
                None => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_state_serde {
                        log::info!("No persisted dashboard state. Creating anew.");
                    }
                    TradeLevelsApp::default()
                }
            },
            None => TradeLevelsApp::default(),
        };

        if let Some(symbol) = &args.symbol {
            app.session.inputs.ticker = symbol.trim().to_uppercase();
        }
        if !pipeline.has_headline_source() && app.session.inputs.use_headlines {
            log::info!("Headline fetching is disabled; sentiment will be neutral");
        }

        // Skipped during deserialization
        app.date_buffers = DateBuffers::from_inputs(&app.session.inputs);
        app.pipeline = Some(pipeline);
        app.runtime = Some(runtime);
        app
    }

    pub(super) fn is_calculating(&self) -> bool {
        self.analysis_promise.is_some()
    }
}

impl eframe::App for TradeLevelsApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Dropping the promise abandons any in-flight fetch
        if let Some(promise) = self.analysis_promise.take() {
            drop(promise);
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_analysis(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
