//! Aggregated performance statistics over a user's trade history.

mod summary_calculator;
mod summary_model;

pub use summary_calculator::summarize_trades;
pub use summary_model::TradeSummary;
