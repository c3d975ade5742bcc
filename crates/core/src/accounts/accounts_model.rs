//! Account domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A user's trading account. Each user owns exactly one account, keyed by
/// the user id.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    pub name: String,
    pub currency: String,
    /// Balance the account started with. `None` until the user records one.
    pub initial_balance: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// The balance history replay starts from, falling back to `default`
    /// when the user never recorded one.
    pub fn starting_balance(&self, default: Decimal) -> Decimal {
        self.initial_balance.unwrap_or(default)
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: Option<Decimal>,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        validate_initial_balance(self.initial_balance)
    }
}

/// Input model for updating an existing account.
///
/// This is the only path through which an initial balance changes after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub user_id: String,
    pub name: String,
    pub currency: String,
    pub initial_balance: Option<Decimal>,
}

impl AccountUpdate {
    /// Validates the account update data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "User ID is required for updates".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency cannot be empty".to_string(),
            )));
        }
        validate_initial_balance(self.initial_balance)
    }
}

fn validate_initial_balance(initial_balance: Option<Decimal>) -> Result<()> {
    match initial_balance {
        Some(balance) if balance <= Decimal::ZERO => Err(Error::Validation(
            ValidationError::InvalidInput(format!(
                "Initial balance must be positive, got {}",
                balance
            )),
        )),
        _ => Ok(()),
    }
}
