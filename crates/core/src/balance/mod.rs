//! Balance replay - turns raw profit/loss amounts into balance-relative
//! percentages by folding a user's chronological trade history.

mod balance_model;
mod balance_recalculator;
mod replay;


pub use balance_model::{AnnotatedTrade, PercentageOutcome, ProfitLossRecord};
pub use balance_recalculator::BalanceRecalculator;
pub use replay::{
    balance_relative_percentage, replay_percentages, running_balances, seed_balance,
};
