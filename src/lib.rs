#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use std::sync::Arc;

// Re-export commonly used types
pub use analysis::{PricePredictor, SentimentScore, TradeLevelCalculator, build_chart_spec};
pub use domain::{Interval, Period, PriceBar, PriceSeries, SeriesRange, SeriesRequest, TradeLevels};
pub use engine::{AnalysisOutcome, AnalysisRequest, LevelSource, TradePipeline};
pub use errors::PipelineError;
pub use models::ChartSpec;
pub use ui::TradeLevelsApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Try the local series cache before Yahoo Finance
    #[arg(long, default_value_t = false)]
    pub prefer_cache: bool,

    /// Ticker to show on start, overriding the last session
    #[arg(long)]
    pub symbol: Option<String>,

    /// Skip headline fetching; sentiment-derived levels use a neutral score
    #[arg(long, default_value_t = false)]
    pub no_headlines: bool,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    runtime: tokio::runtime::Handle,
    args: &Cli,
) -> Box<dyn eframe::App> {
    let pipeline = Arc::new(TradePipeline::from_cli(args));
    let app = ui::TradeLevelsApp::new(cc, pipeline, runtime, args);
    Box::new(app)
}
