pub mod messages;
pub mod pipeline;
pub mod session;

// Re-export key components
pub use messages::{AnalysisOutcome, AnalysisRequest, LevelSource};
pub use pipeline::TradePipeline;
pub use session::{LevelMode, RangeMode, SessionContext, SessionInputs};
