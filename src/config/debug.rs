//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Call sites are further gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit UI interaction logs (e.g., ticker changes, button presses).
    pub print_ui_interactions: bool,
    /// Emit which market-data source served each request.
    pub print_source_selection: bool,
    /// Emit per-headline polarity while scoring sentiment.
    pub print_headline_scores: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_source_selection: true,
    print_headline_scores: false,
    print_state_serde: false,
    print_shutdown: false,
};
