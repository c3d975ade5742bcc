use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Performance statistics over a chronological trade history.
///
/// Percentages are expressed in percent (5 means 5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub win_rate: Decimal,
    pub net_profit_loss: Decimal,
    pub gross_profit: Decimal,
    /// Sum of losing trades, as a positive amount.
    pub gross_loss: Decimal,
    pub average_win: Decimal,
    /// Average losing trade, as a positive amount.
    pub average_loss: Decimal,
    /// Gross profit over gross loss. `None` when there are no losses.
    pub profit_factor: Option<Decimal>,
    pub largest_win: Decimal,
    pub largest_loss: Decimal,
    pub initial_balance: Decimal,
    pub final_balance: Decimal,
    /// Net profit/loss relative to the initial balance.
    pub total_return: Decimal,
    /// Largest peak-to-trough fall of the running balance.
    pub max_drawdown: Decimal,
}
