//! In-memory repositories shared by the service tests.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use crate::balance::AnnotatedTrade;
use crate::errors::{DatabaseError, Error, Result};
use crate::trades::{NewTrade, Trade, TradeRepositoryTrait, TradeUpdate};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn unavailable() -> Error {
    Error::Database(DatabaseError::ConnectionFailed(
        "store unavailable".to_string(),
    ))
}

// --- Mock AccountRepository ---
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, user_id: &str, initial_balance: Option<Decimal>) -> Self {
        self.accounts.lock().unwrap().insert(
            user_id.to_string(),
            Account {
                user_id: user_id.to_string(),
                name: "Test account".to_string(),
                currency: "USD".to_string(),
                initial_balance,
                created_at: base_time(),
                updated_at: base_time(),
            },
        );
        self
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }
}

#[async_trait]
impl AccountRepositoryTrait for MockAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        let account = Account {
            user_id: new_account.user_id.clone(),
            name: new_account.name,
            currency: new_account.currency,
            initial_balance: new_account.initial_balance,
            created_at: base_time(),
            updated_at: base_time(),
        };
        self.accounts
            .lock()
            .unwrap()
            .insert(new_account.user_id, account.clone());
        Ok(account)
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get_mut(&account_update.user_id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound("account".to_string())))?;
        account.name = account_update.name;
        account.currency = account_update.currency;
        account.initial_balance = account_update.initial_balance;
        Ok(account.clone())
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        Ok(self.accounts.lock().unwrap().remove(user_id).map_or(0, |_| 1))
    }

    fn get_by_user(&self, user_id: &str) -> Result<Account> {
        if *self.fail_reads.lock().unwrap() {
            return Err(unavailable());
        }
        self.accounts
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(user_id.to_string())))
    }
}

// --- Mock TradeRepository ---
#[derive(Clone, Default)]
pub struct MockTradeRepository {
    trades: Arc<Mutex<Vec<Trade>>>,
    next_seq: Arc<Mutex<i64>>,
    fail_reads: Arc<Mutex<bool>>,
}

impl MockTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds already persisted trades, in chronological order.
    pub fn with_history(self, user_id: &str, profit_losses: &[Decimal]) -> Self {
        for profit_loss in profit_losses {
            self.insert(
                NewTrade {
                    user_id: user_id.to_string(),
                    symbol: "SPY".to_string(),
                    profit_loss: *profit_loss,
                    ..Default::default()
                },
                Decimal::ZERO,
            );
        }
        self
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    pub fn all(&self) -> Vec<Trade> {
        self.trades.lock().unwrap().clone()
    }

    fn insert(&self, new_trade: NewTrade, profit_loss_percentage: Decimal) -> Trade {
        let mut trades = self.trades.lock().unwrap();
        let seq = {
            let mut next_seq = self.next_seq.lock().unwrap();
            let seq = *next_seq;
            *next_seq += 1;
            seq
        };
        let created_at = base_time() + Duration::minutes(seq);
        let trade = Trade {
            id: format!("trade-{}", seq + 1),
            user_id: new_trade.user_id,
            symbol: new_trade.symbol,
            direction: new_trade.direction,
            entry_price: new_trade.entry_price,
            exit_price: new_trade.exit_price,
            quantity: new_trade.quantity,
            profit_loss: new_trade.profit_loss,
            profit_loss_percentage,
            notes: new_trade.notes,
            chart_image_url: new_trade.chart_image_url,
            traded_at: new_trade.traded_at,
            created_at,
            updated_at: created_at,
        };
        trades.push(trade.clone());
        trade
    }
}

#[async_trait]
impl TradeRepositoryTrait for MockTradeRepository {
    async fn create(&self, new_trade: AnnotatedTrade<NewTrade>) -> Result<Trade> {
        Ok(self.insert(new_trade.trade, new_trade.profit_loss_percentage))
    }

    async fn create_many(&self, new_trades: Vec<AnnotatedTrade<NewTrade>>) -> Result<Vec<Trade>> {
        Ok(new_trades
            .into_iter()
            .map(|t| self.insert(t.trade, t.profit_loss_percentage))
            .collect())
    }

    async fn update(&self, trade_update: TradeUpdate) -> Result<Trade> {
        let mut trades = self.trades.lock().unwrap();
        let trade = trades
            .iter_mut()
            .find(|t| t.id == trade_update.id)
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(trade_update.id.clone())))?;
        trade.symbol = trade_update.symbol;
        trade.direction = trade_update.direction;
        trade.entry_price = trade_update.entry_price;
        trade.exit_price = trade_update.exit_price;
        trade.quantity = trade_update.quantity;
        trade.profit_loss = trade_update.profit_loss;
        trade.notes = trade_update.notes;
        trade.chart_image_url = trade_update.chart_image_url;
        trade.traded_at = trade_update.traded_at;
        Ok(trade.clone())
    }

    async fn delete(&self, trade_id: &str) -> Result<usize> {
        let mut trades = self.trades.lock().unwrap();
        let before = trades.len();
        trades.retain(|t| t.id != trade_id);
        Ok(before - trades.len())
    }

    fn get_by_id(&self, trade_id: &str) -> Result<Trade> {
        self.trades
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == trade_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(trade_id.to_string())))
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Trade>> {
        if *self.fail_reads.lock().unwrap() {
            return Err(unavailable());
        }
        let mut trades: Vec<Trade> = self
            .trades
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        trades.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(trades)
    }
}
