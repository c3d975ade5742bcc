use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::trades_model::{NewTrade, Trade, TradeUpdate};
use super::trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
use crate::accounts::AccountServiceTrait;
use crate::balance::{AnnotatedTrade, BalanceRecalculator, PercentageOutcome};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::summary::{summarize_trades, TradeSummary};

/// Service recording trades and owning persistence of their derived
/// percentages.
pub struct TradeService {
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    account_service: Arc<dyn AccountServiceTrait>,
    recalculator: Arc<BalanceRecalculator>,
}

impl TradeService {
    pub fn new(
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        account_service: Arc<dyn AccountServiceTrait>,
        recalculator: Arc<BalanceRecalculator>,
    ) -> Self {
        Self {
            trade_repository,
            account_service,
            recalculator,
        }
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        new_trade.validate()?;

        let outcome = self
            .recalculator
            .single_trade_percentage(new_trade.profit_loss, &new_trade.user_id);
        if let Some(reason) = outcome.degraded_reason() {
            warn!(
                "Recording {} trade for user {} with a 0% fallback: {}",
                new_trade.symbol, new_trade.user_id, reason
            );
        }

        let trade = self
            .trade_repository
            .create(AnnotatedTrade::new(new_trade, outcome.into_value()))
            .await?;
        debug!(
            "Recorded trade {} ({} {}%)",
            trade.id, trade.profit_loss, trade.profit_loss_percentage
        );
        Ok(trade)
    }

    async fn import_trades(&self, new_trades: Vec<NewTrade>) -> Result<Vec<Trade>> {
        let Some(first) = new_trades.first() else {
            return Ok(Vec::new());
        };
        let user_id = first.user_id.clone();

        for trade in &new_trades {
            trade.validate()?;
            if trade.user_id != user_id {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Imported trades must belong to one user, found '{}' and '{}'",
                    user_id, trade.user_id
                ))));
            }
        }

        let outcome = self
            .recalculator
            .batch_trade_percentages(&new_trades, &user_id);
        if let PercentageOutcome::DegradedDefault { reason, .. } = &outcome {
            warn!(
                "Importing {} trades for user {} with 0% fallbacks: {}",
                new_trades.len(),
                user_id,
                reason
            );
        }

        let trades = self
            .trade_repository
            .create_many(outcome.into_value())
            .await?;
        info!("Imported {} trades for user {}", trades.len(), user_id);
        Ok(trades)
    }

    async fn update_trade(&self, trade_update: TradeUpdate) -> Result<Trade> {
        trade_update.validate()?;
        self.trade_repository.update(trade_update).await
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<()> {
        let deleted = self.trade_repository.delete(trade_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Trade {} not found",
                trade_id
            ))));
        }
        Ok(())
    }

    fn get_trade(&self, trade_id: &str) -> Result<Trade> {
        self.trade_repository.get_by_id(trade_id)
    }

    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        self.trade_repository.list_by_user(user_id)
    }

    fn get_summary(&self, user_id: &str) -> Result<TradeSummary> {
        let starting_balance = self.account_service.get_starting_balance(user_id)?;
        let trades = self.trade_repository.list_by_user(user_id)?;
        summarize_trades(starting_balance, &trades)
    }
}
