use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::{AccountChangesetDB, AccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;
use tradejournal_core::accounts::{Account, AccountRepositoryTrait, AccountUpdate, NewAccount};
use tradejournal_core::errors::Result;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;

        self.writer
            .exec(move |conn| {
                let account_db: AccountDB = new_account.into();

                diesel::insert_into(accounts::table)
                    .values(&account_db)
                    .execute(conn)
                    .into_core()?;

                account_db.try_into()
            })
            .await
    }

    async fn update(&self, account_update: AccountUpdate) -> Result<Account> {
        account_update.validate()?;

        self.writer
            .exec(move |conn| {
                let target_user = account_update.user_id.clone();
                let changes: AccountChangesetDB = account_update.into();

                let updated = diesel::update(accounts::table.find(&target_user))
                    .set(&changes)
                    .returning(AccountDB::as_returning())
                    .get_result::<AccountDB>(conn)
                    .into_core()?;

                updated.try_into()
            })
            .await
    }

    /// Retrieves the account owned by a user
    fn get_by_user(&self, user_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts::table
            .select(AccountDB::as_select())
            .find(user_id)
            .first::<AccountDB>(&mut conn)
            .into_core()?;

        account.try_into()
    }

    /// Deletes a user's account and returns the number of deleted records
    async fn delete(&self, user_id: &str) -> Result<usize> {
        let target_user = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts::table.find(target_user))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (AccountRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (AccountRepository::new(pool, writer), temp_dir)
    }

    fn new_account(user_id: &str, initial_balance: Option<rust_decimal::Decimal>) -> NewAccount {
        NewAccount {
            user_id: user_id.to_string(),
            name: "Futures".to_string(),
            currency: "USD".to_string(),
            initial_balance,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_user() {
        let (repo, _temp_dir) = create_test_repository().await;

        let created = repo
            .create(new_account("user-1", Some(dec!(25000.50))))
            .await
            .expect("Failed to create account");
        let loaded = repo.get_by_user("user-1").expect("Failed to load account");

        assert_eq!(loaded, created);
        assert_eq!(loaded.initial_balance, Some(dec!(25000.50)));
    }

    #[tokio::test]
    async fn test_missing_account_is_not_found() {
        let (repo, _temp_dir) = create_test_repository().await;
        let err = repo.get_by_user("nobody").unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_account_is_rejected() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(new_account("user-1", None)).await.unwrap();

        assert!(repo.create(new_account("user-1", None)).await.is_err());
    }

    #[tokio::test]
    async fn test_update_can_clear_initial_balance() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(new_account("user-1", Some(dec!(5000))))
            .await
            .unwrap();

        let updated = repo
            .update(AccountUpdate {
                user_id: "user-1".to_string(),
                name: "Swing".to_string(),
                currency: "EUR".to_string(),
                initial_balance: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "Swing");
        assert_eq!(updated.currency, "EUR");
        assert_eq!(updated.initial_balance, None);
        assert_eq!(repo.get_by_user("user-1").unwrap().initial_balance, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.create(new_account("user-1", None)).await.unwrap();

        assert_eq!(repo.delete("user-1").await.unwrap(), 1);
        assert_eq!(repo.delete("user-1").await.unwrap(), 0);
        assert!(repo.get_by_user("user-1").unwrap_err().is_not_found());
    }
}
