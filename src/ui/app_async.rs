use std::sync::Arc;

use eframe::egui;
use poll_promise::Promise;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::errors::PipelineError;
use crate::ui::app::TradeLevelsApp;

impl TradeLevelsApp {
    /// Kicks off one fetch-score-derive-annotate cycle on a worker thread.
    /// Ignored while a cycle is already running.
    pub(super) fn start_analysis(&mut self) {
        if self.analysis_promise.is_some() {
            return;
        }

        let Some(request) = self.session.prepare_request() else {
            return;
        };

        let (Some(pipeline), Some(runtime)) = (self.pipeline.as_ref(), self.runtime.as_ref())
        else {
            self.session.record(Err(PipelineError::upstream(
                "dashboard",
                "analysis pipeline is not initialised",
            )));
            return;
        };
        let pipeline = Arc::clone(pipeline);
        let runtime = runtime.clone();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "Starting analysis for {} ({:?}, {})",
                request.series.symbol,
                request.series.range,
                request.series.interval
            );
        }

        // The pipeline's sources are async; block on them from the worker
        // thread so the UI thread never waits.
        let promise = Promise::spawn_thread("trade_analysis", move || {
            runtime.block_on(pipeline.run(request))
        });
        self.analysis_promise = Some(promise);
    }

    pub(super) fn poll_analysis(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.analysis_promise.take() else {
            return;
        };

        match promise.try_take() {
            Ok(result) => {
                self.plot_view.clear_cache();
                self.session.record(result);
                ctx.request_repaint();
            }
            Err(pending) => {
                self.analysis_promise = Some(pending);
                // Keep frames coming until the worker answers
                ctx.request_repaint();
            }
        }
    }
}
