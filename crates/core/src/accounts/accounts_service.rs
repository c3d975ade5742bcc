use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::config::JournalConfig;
use crate::constants::DEFAULT_CURRENCY;
use crate::errors::Result;

/// Service for managing trading accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    config: JournalConfig,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(repository: Arc<dyn AccountRepositoryTrait>, config: JournalConfig) -> Self {
        Self { repository, config }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, mut new_account: NewAccount) -> Result<Account> {
        if new_account.currency.trim().is_empty() {
            new_account.currency = DEFAULT_CURRENCY.to_string();
        }
        new_account.validate()?;
        debug!(
            "Creating account for user {} (initial balance: {:?})",
            new_account.user_id, new_account.initial_balance
        );
        self.repository.create(new_account).await
    }

    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;
        self.repository.update(account_update).await
    }

    async fn delete_account(&self, user_id: &str) -> Result<()> {
        self.repository.delete(user_id).await?;
        Ok(())
    }

    fn get_account(&self, user_id: &str) -> Result<Account> {
        self.repository.get_by_user(user_id)
    }

    fn get_starting_balance(&self, user_id: &str) -> Result<Decimal> {
        match self.repository.get_by_user(user_id) {
            Ok(account) => Ok(account.starting_balance(self.config.default_initial_balance)),
            Err(e) if e.is_not_found() => Ok(self.config.default_initial_balance),
            Err(e) => Err(e),
        }
    }
}
