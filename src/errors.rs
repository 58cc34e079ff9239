//! Error taxonomy shared by the trade-level pipeline and its collaborators.

use thiserror::Error;

/// Failures the pipeline reports to its caller.
///
/// `Clone` so results can be handed back across the UI promise boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// Caller-supplied numbers that cannot produce levels (non-positive, NaN, unordered bars).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No price data for the requested symbol/range.
    #[error("No price data for {symbol}")]
    EmptySeries { symbol: String },

    /// A market-data or headline collaborator failed.
    #[error("{source_name} failed: {message}")]
    UpstreamFailure {
        source_name: String,
        message: String,
    },

    /// No real prediction model is wired in.
    #[error("Prediction unavailable: {0}")]
    PredictionUnavailable(String),
}

impl PipelineError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PipelineError::InvalidInput(msg.into())
    }

    pub fn empty_series(symbol: impl Into<String>) -> Self {
        PipelineError::EmptySeries {
            symbol: symbol.into(),
        }
    }

    pub fn upstream(source_name: impl Into<String>, message: impl ToString) -> Self {
        PipelineError::UpstreamFailure {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Text shown to the user in place of a chart.
    pub fn user_notice(&self) -> String {
        match self {
            PipelineError::InvalidInput(msg) => format!("Please check your inputs: {}", msg),
            PipelineError::EmptySeries { .. } => {
                "No data available for the selected stock and time range.".to_string()
            }
            PipelineError::UpstreamFailure { source_name, .. } => format!(
                "Could not fetch market data from {}. Please try again later.",
                source_name
            ),
            PipelineError::PredictionUnavailable(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_notice_matches_dashboard_wording() {
        let err = PipelineError::empty_series("AAPL");
        assert_eq!(
            err.user_notice(),
            "No data available for the selected stock and time range."
        );
        assert_eq!(err.to_string(), "No price data for AAPL");
    }

    #[test]
    fn upstream_notice_names_the_source() {
        let err = PipelineError::upstream("Yahoo Finance", "timed out");
        assert!(err.user_notice().contains("Yahoo Finance"));
        assert_eq!(err.to_string(), "Yahoo Finance failed: timed out");
    }
}
