//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
///
/// Implementations of this trait handle the persistence of account data.
/// The trait is database-agnostic - storage-specific details are handled
/// by concrete implementations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates a new account.
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an existing account.
    async fn update(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes the account owned by `user_id`.
    ///
    /// Returns the number of deleted records.
    async fn delete(&self, user_id: &str) -> Result<usize>;

    /// Retrieves the account owned by `user_id`.
    ///
    /// Returns `DatabaseError::NotFound` when the user has no account.
    fn get_by_user(&self, user_id: &str) -> Result<Account>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    /// Updates an existing account with business validation.
    async fn update_account(&self, account_update: AccountUpdate) -> Result<Account>;

    /// Deletes the account owned by `user_id`.
    async fn delete_account(&self, user_id: &str) -> Result<()>;

    /// Retrieves the account owned by `user_id`.
    fn get_account(&self, user_id: &str) -> Result<Account>;

    /// Resolves the balance a user's history replay starts from.
    ///
    /// Users without an account or without a recorded initial balance get
    /// the configured default.
    fn get_starting_balance(&self, user_id: &str) -> Result<rust_decimal::Decimal>;
}
