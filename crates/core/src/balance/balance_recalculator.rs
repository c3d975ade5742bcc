use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::balance_model::{AnnotatedTrade, PercentageOutcome, ProfitLossRecord};
use super::replay::{balance_relative_percentage, replay_percentages, seed_balance};
use crate::accounts::AccountRepositoryTrait;
use crate::config::JournalConfig;
use crate::errors::{Error, Result};
use crate::trades::TradeRepositoryTrait;

/// Derives balance-relative profit/loss percentages from a user's stored
/// account and trade history.
///
/// Every call reads the history fresh and holds no state between calls.
/// There is no per-account locking: two concurrent calls for the same user
/// see the same history, so trades created concurrently are each measured
/// against the same pre-balance. Callers that need percentages to compose
/// must serialize trade creation per account.
pub struct BalanceRecalculator {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    config: JournalConfig,
}

impl BalanceRecalculator {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        config: JournalConfig,
    ) -> Self {
        Self {
            account_repository,
            trade_repository,
            config,
        }
    }

    /// Percentage a new trade with `profit_loss` represents relative to the
    /// user's current balance.
    pub fn single_trade_percentage(
        &self,
        profit_loss: Decimal,
        user_id: &str,
    ) -> PercentageOutcome<Decimal> {
        match self.current_balance(user_id) {
            Ok(balance) => {
                let percentage = balance_relative_percentage(
                    profit_loss,
                    balance,
                    self.config.percentage_precision,
                );
                debug!(
                    "Computed {}% for P/L {} against balance {} (user {})",
                    percentage, profit_loss, balance, user_id
                );
                PercentageOutcome::Computed(percentage)
            }
            Err(e) => {
                warn!(
                    "Trade history unavailable for user {}, defaulting percentage to 0: {}",
                    user_id, e
                );
                PercentageOutcome::DegradedDefault {
                    value: Decimal::ZERO,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Percentages for a batch of new trades appended in the given order.
    ///
    /// Returns copies of `trades`, each paired with its percentage. Order and
    /// count always match the input.
    pub fn batch_trade_percentages<T>(
        &self,
        trades: &[T],
        user_id: &str,
    ) -> PercentageOutcome<Vec<AnnotatedTrade<T>>>
    where
        T: ProfitLossRecord + Clone,
    {
        let replayed = self.current_balance(user_id).and_then(|balance| {
            replay_percentages(balance, trades, self.config.percentage_precision).ok_or_else(
                || Error::Unexpected("running balance overflowed during replay".to_string()),
            )
        });

        match replayed {
            Ok(percentages) => PercentageOutcome::Computed(
                trades
                    .iter()
                    .cloned()
                    .zip(percentages)
                    .map(|(trade, percentage)| AnnotatedTrade::new(trade, percentage))
                    .collect(),
            ),
            Err(e) => {
                warn!(
                    "Trade history unavailable for user {}, defaulting {} percentages to 0: {}",
                    user_id,
                    trades.len(),
                    e
                );
                PercentageOutcome::DegradedDefault {
                    value: trades
                        .iter()
                        .cloned()
                        .map(|trade| AnnotatedTrade::new(trade, Decimal::ZERO))
                        .collect(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Initial balance plus the net profit/loss of every persisted trade.
    fn current_balance(&self, user_id: &str) -> Result<Decimal> {
        let initial_balance = self.initial_balance(user_id)?;
        let history = self.trade_repository.list_by_user(user_id)?;
        seed_balance(initial_balance, &history).ok_or_else(|| {
            Error::Unexpected(format!(
                "balance of {} trades overflowed for user {}",
                history.len(),
                user_id
            ))
        })
    }

    fn initial_balance(&self, user_id: &str) -> Result<Decimal> {
        match self.account_repository.get_by_user(user_id) {
            Ok(account) => Ok(account.starting_balance(self.config.default_initial_balance)),
            Err(e) if e.is_not_found() => Ok(self.config.default_initial_balance),
            Err(e) => Err(e),
        }
    }
}
