//! Every user-facing string in the dashboard.

pub struct UiText {
    pub app_title: &'static str,

    // Side panel
    pub market_heading: &'static str,
    pub ticker_label: &'static str,
    pub range_label: &'static str,
    pub period_label: &'static str,
    pub start_date_label: &'static str,
    pub end_date_label: &'static str,
    pub date_hint: &'static str,
    pub interval_label: &'static str,
    pub headlines_toggle: &'static str,
    pub generate_button: &'static str,
    pub generating: &'static str,

    pub levels_heading: &'static str,
    pub level_mode_label: &'static str,
    pub sentiment_mode_helper: &'static str,

    pub portfolio_heading: &'static str,
    pub portfolio_ticker: &'static str,
    pub portfolio_buy_price: &'static str,
    pub portfolio_quantity: &'static str,
    pub portfolio_add_button: &'static str,
    pub portfolio_empty: &'static str,
    pub portfolio_total_cost: &'static str,
    pub portfolio_columns: [&'static str; 6],

    // Central panel
    pub tab_chart: &'static str,
    pub tab_data: &'static str,
    pub chart_placeholder: &'static str,
    pub data_columns: [&'static str; 6],
    pub crossed_levels_warning: &'static str,

    // Status bar
    pub status_source: &'static str,
    pub status_sentiment: &'static str,
    pub status_risk_reward: &'static str,
    pub status_prediction: &'static str,
    pub prediction_placeholder: &'static str,
    pub status_idle: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "Trade Levels",

    market_heading: "Market Data",
    ticker_label: "Stock ticker",
    range_label: "Range",
    period_label: "Period",
    start_date_label: "Start",
    end_date_label: "End",
    date_hint: "YYYY-MM-DD",
    interval_label: "Interval",
    headlines_toggle: "Score headline sentiment",
    generate_button: "Generate Chart",
    generating: "Fetching and analysing...",

    levels_heading: "Trade Levels",
    level_mode_label: "Levels from",
    sentiment_mode_helper: "Entry and target move with headline sentiment; stop loss is 2% under the last close.",

    portfolio_heading: "Portfolio",
    portfolio_ticker: "Ticker",
    portfolio_buy_price: "Buy price",
    portfolio_quantity: "Quantity",
    portfolio_add_button: "Add to Portfolio",
    portfolio_empty: "No positions yet",
    portfolio_total_cost: "Total cost",
    portfolio_columns: ["Ticker", "Qty", "Buy", "Last", "Value", "P&L"],

    tab_chart: "Chart",
    tab_data: "Data",
    chart_placeholder: "Enter a ticker and press Generate Chart.",
    data_columns: ["Time", "Open", "High", "Low", "Close", "Volume"],
    crossed_levels_warning: "Levels are not ordered stop < entry <= target for a long position.",

    status_source: "Source",
    status_sentiment: "Sentiment",
    status_risk_reward: "R:R",
    status_prediction: "Prediction",
    prediction_placeholder: "placeholder model, not a forecast",
    status_idle: "Ready",
};
