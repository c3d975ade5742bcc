//! Trade repository and service traits.

use async_trait::async_trait;

use super::trades_model::{NewTrade, Trade, TradeUpdate};
use crate::balance::AnnotatedTrade;
use crate::errors::Result;
use crate::summary::TradeSummary;

/// Trait defining the contract for Trade repository operations.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    /// Persists a new trade together with its derived percentage.
    async fn create(&self, new_trade: AnnotatedTrade<NewTrade>) -> Result<Trade>;

    /// Persists several trades in one write, keeping their order.
    ///
    /// Trades later in the input must sort after earlier ones in
    /// `list_by_user`.
    async fn create_many(&self, new_trades: Vec<AnnotatedTrade<NewTrade>>) -> Result<Vec<Trade>>;

    /// Updates an existing trade. The stored percentage is left untouched.
    async fn update(&self, trade_update: TradeUpdate) -> Result<Trade>;

    /// Deletes a trade by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, trade_id: &str) -> Result<usize>;

    /// Retrieves a trade by its ID.
    fn get_by_id(&self, trade_id: &str) -> Result<Trade>;

    /// Lists a user's trades in chronological order (`created_at`
    /// ascending, ties broken by ID).
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Trade>>;
}

/// Trait defining the contract for Trade service operations.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    /// Records a single trade, deriving its percentage from the user's
    /// current balance.
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;

    /// Records a batch of trades for one user, appended in the given order.
    async fn import_trades(&self, new_trades: Vec<NewTrade>) -> Result<Vec<Trade>>;

    /// Edits a recorded trade.
    async fn update_trade(&self, trade_update: TradeUpdate) -> Result<Trade>;

    /// Deletes a recorded trade.
    async fn delete_trade(&self, trade_id: &str) -> Result<()>;

    fn get_trade(&self, trade_id: &str) -> Result<Trade>;

    fn list_trades(&self, user_id: &str) -> Result<Vec<Trade>>;

    /// Aggregated performance over the user's whole history.
    fn get_summary(&self, user_id: &str) -> Result<TradeSummary>;
}
