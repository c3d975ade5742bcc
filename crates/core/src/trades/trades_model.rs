//! Trade domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::balance::ProfitLossRecord;
use crate::notes::TradeNote;
use crate::{errors::ValidationError, Error, Result};

/// Side of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    #[default]
    Long,
    Short,
}

impl TradeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Long => "LONG",
            TradeDirection::Short => "SHORT",
        }
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "LONG" | "BUY" => Ok(TradeDirection::Long),
            "SHORT" | "SELL" => Ok(TradeDirection::Short),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown trade direction '{}'",
                other
            )))),
        }
    }
}

/// A closed (or closing) position recorded in the journal.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    /// Realized gain or loss in account currency.
    pub profit_loss: Decimal,
    /// `profit_loss` as a percentage of the balance just before this trade.
    /// Derived when the trade is created and never set from input.
    pub profit_loss_percentage: Decimal,
    /// Encoded reflection note, see [`TradeNote`].
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub traded_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Trade {
    /// Decodes the stored note text.
    pub fn note(&self) -> TradeNote {
        TradeNote::decode(self.notes.as_deref().unwrap_or_default())
    }
}

impl ProfitLossRecord for Trade {
    fn profit_loss(&self) -> Decimal {
        self.profit_loss
    }
}

/// Input model for recording a trade.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub user_id: String,
    pub symbol: String,
    #[serde(default)]
    pub direction: TradeDirection,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub profit_loss: Decimal,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub traded_at: Option<NaiveDateTime>,
}

impl NewTrade {
    /// Replaces the note text with the encoded form of `note`.
    pub fn with_note(mut self, note: &TradeNote) -> Self {
        self.notes = note.encode();
        self
    }

    /// Validates the new trade data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        validate_symbol(&self.symbol)?;
        validate_positive("entryPrice", self.entry_price)?;
        validate_positive("exitPrice", self.exit_price)?;
        validate_positive("quantity", self.quantity)?;
        validate_notes(self.notes.as_deref())
    }
}

impl ProfitLossRecord for NewTrade {
    fn profit_loss(&self) -> Decimal {
        self.profit_loss
    }
}

/// Input model for editing a recorded trade.
///
/// Editing never recomputes the stored percentage of this or any other
/// trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdate {
    pub id: String,
    pub symbol: String,
    pub direction: TradeDirection,
    pub entry_price: Option<Decimal>,
    pub exit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub profit_loss: Decimal,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub traded_at: Option<NaiveDateTime>,
}

impl TradeUpdate {
    /// Validates the trade update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Trade ID is required for updates".to_string(),
            )));
        }
        validate_symbol(&self.symbol)?;
        validate_positive("entryPrice", self.entry_price)?;
        validate_positive("exitPrice", self.exit_price)?;
        validate_positive("quantity", self.quantity)?;
        validate_notes(self.notes.as_deref())
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Symbol cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<()> {
    match notes {
        Some(text) => TradeNote::decode(text).validate(),
        None => Ok(()),
    }
}

fn validate_positive(field: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v <= Decimal::ZERO => Err(Error::Validation(ValidationError::InvalidInput(
            format!("{} must be positive, got {}", field, v),
        ))),
        _ => Ok(()),
    }
}
