// Renderer-facing models built by the analysis layer
// These types carry no UI dependency

pub mod chart_spec;

// Re-export key types for convenience
pub use chart_spec::{
    AxisLabels, ChartKind, ChartSpec, DashPattern, LineStyleHint, ReferenceLine, Rgb,
};
