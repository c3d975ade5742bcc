//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decimal_to_text, parse_optional_decimal};
use tradejournal_core::accounts::{Account, AccountUpdate, NewAccount};
use tradejournal_core::errors::{Error, Result};

/// Database model for accounts
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns an account update may change.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(treat_none_as_null = true)]
pub struct AccountChangesetDB {
    pub name: String,
    pub currency: String,
    pub initial_balance: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<AccountDB> for Account {
    type Error = Error;

    fn try_from(db: AccountDB) -> Result<Self> {
        Ok(Self {
            initial_balance: parse_optional_decimal(
                db.initial_balance.as_deref(),
                "initial_balance",
            )?,
            user_id: db.user_id,
            name: db.name,
            currency: db.currency,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            user_id: domain.user_id,
            name: domain.name,
            currency: domain.currency,
            initial_balance: domain.initial_balance.map(decimal_to_text),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<AccountUpdate> for AccountChangesetDB {
    fn from(domain: AccountUpdate) -> Self {
        Self {
            name: domain.name,
            currency: domain.currency,
            initial_balance: domain.initial_balance.map(decimal_to_text),
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
