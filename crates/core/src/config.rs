//! Runtime configuration for the journal services.

use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::{DEFAULT_INITIAL_BALANCE, PERCENTAGE_DECIMAL_PRECISION};
use crate::errors::{Error, Result};

/// Environment variable overriding the default starting balance.
pub const ENV_DEFAULT_INITIAL_BALANCE: &str = "TJ_DEFAULT_INITIAL_BALANCE";
/// Environment variable overriding the percentage precision.
pub const ENV_PERCENTAGE_PRECISION: &str = "TJ_PERCENTAGE_PRECISION";

/// Largest scale a `Decimal` can carry.
const MAX_DECIMAL_SCALE: u32 = 28;

#[derive(Debug, Clone, PartialEq)]
pub struct JournalConfig {
    /// Balance assumed for accounts without a recorded initial balance.
    pub default_initial_balance: Decimal,
    /// Decimal places kept on stored profit/loss percentages.
    pub percentage_precision: u32,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            default_initial_balance: DEFAULT_INITIAL_BALANCE,
            percentage_precision: PERCENTAGE_DECIMAL_PRECISION,
        }
    }
}

impl JournalConfig {
    /// Builds the configuration from the process environment, loading a
    /// `.env` file first when one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults; set but unparsable keys are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DEFAULT_INITIAL_BALANCE) {
            let balance = Decimal::from_str(raw.trim()).map_err(|e| {
                Error::InvalidConfigValue(format!("{}='{}': {}", ENV_DEFAULT_INITIAL_BALANCE, raw, e))
            })?;
            config.default_initial_balance = balance;
        }

        if let Some(raw) = lookup(ENV_PERCENTAGE_PRECISION) {
            let precision = raw.trim().parse::<u32>().map_err(|e| {
                Error::InvalidConfigValue(format!("{}='{}': {}", ENV_PERCENTAGE_PRECISION, raw, e))
            })?;
            config.percentage_precision = precision;
        }

        config.validate()?;
        debug!("Loaded journal config: {:?}", config);
        Ok(config)
    }

    pub fn with_default_initial_balance(mut self, balance: Decimal) -> Self {
        self.default_initial_balance = balance;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_initial_balance <= Decimal::ZERO {
            return Err(Error::InvalidConfigValue(format!(
                "default initial balance must be positive, got {}",
                self.default_initial_balance
            )));
        }
        if self.percentage_precision > MAX_DECIMAL_SCALE {
            return Err(Error::InvalidConfigValue(format!(
                "percentage precision must be at most {}, got {}",
                MAX_DECIMAL_SCALE, self.percentage_precision
            )));
        }
        Ok(())
    }
}
