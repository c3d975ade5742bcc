//! Balance replay models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Anything that carries a realized profit/loss amount.
pub trait ProfitLossRecord {
    fn profit_loss(&self) -> Decimal;
}

impl ProfitLossRecord for Decimal {
    fn profit_loss(&self) -> Decimal {
        *self
    }
}

impl<T: ProfitLossRecord> ProfitLossRecord for AnnotatedTrade<T> {
    fn profit_loss(&self) -> Decimal {
        self.trade.profit_loss()
    }
}

/// A trade-like record paired with its balance-relative percentage.
///
/// Serializes as the wrapped record with an extra `profitLossPercentage`
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedTrade<T> {
    #[serde(flatten)]
    pub trade: T,
    pub profit_loss_percentage: Decimal,
}

impl<T> AnnotatedTrade<T> {
    pub fn new(trade: T, profit_loss_percentage: Decimal) -> Self {
        Self {
            trade,
            profit_loss_percentage,
        }
    }
}

/// Result of a percentage computation.
///
/// Percentage computation never fails: when the account or trade history
/// cannot be read the value falls back to zero and the outcome records why.
#[derive(Debug, Clone, PartialEq)]
pub enum PercentageOutcome<T> {
    /// Value derived from the stored history.
    Computed(T),
    /// Zero-filled fallback used because the history could not be read.
    DegradedDefault { value: T, reason: String },
}

impl<T> PercentageOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            PercentageOutcome::Computed(value) => value,
            PercentageOutcome::DegradedDefault { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            PercentageOutcome::Computed(value) => value,
            PercentageOutcome::DegradedDefault { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, PercentageOutcome::DegradedDefault { .. })
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            PercentageOutcome::Computed(_) => None,
            PercentageOutcome::DegradedDefault { reason, .. } => Some(reason.as_str()),
        }
    }
}
