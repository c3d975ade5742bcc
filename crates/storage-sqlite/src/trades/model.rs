//! Database models for trades.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use std::str::FromStr;

use crate::utils::{decimal_to_text, parse_decimal, parse_optional_decimal};
use tradejournal_core::balance::AnnotatedTrade;
use tradejournal_core::errors::{Error, Result};
use tradejournal_core::trades::{NewTrade, Trade, TradeDirection, TradeUpdate};

/// Database model for trades. Decimal amounts are stored as text.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub direction: String,
    pub entry_price: Option<String>,
    pub exit_price: Option<String>,
    pub quantity: Option<String>,
    pub profit_loss: String,
    pub profit_loss_percentage: String,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub traded_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TradeDB {
    /// Builds the row for a new trade. Identity and timestamps are assigned
    /// by the repository.
    pub fn from_new(new_trade: AnnotatedTrade<NewTrade>, id: String, created_at: NaiveDateTime) -> Self {
        let AnnotatedTrade {
            trade,
            profit_loss_percentage,
        } = new_trade;
        Self {
            id,
            user_id: trade.user_id,
            symbol: trade.symbol,
            direction: trade.direction.as_str().to_string(),
            entry_price: trade.entry_price.map(decimal_to_text),
            exit_price: trade.exit_price.map(decimal_to_text),
            quantity: trade.quantity.map(decimal_to_text),
            profit_loss: decimal_to_text(trade.profit_loss),
            profit_loss_percentage: decimal_to_text(profit_loss_percentage),
            notes: trade.notes,
            chart_image_url: trade.chart_image_url,
            traded_at: trade.traded_at,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Columns a trade edit may change. The stored percentage, owner and
/// creation time are deliberately absent.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(treat_none_as_null = true)]
pub struct TradeChangesetDB {
    pub symbol: String,
    pub direction: String,
    pub entry_price: Option<String>,
    pub exit_price: Option<String>,
    pub quantity: Option<String>,
    pub profit_loss: String,
    pub notes: Option<String>,
    pub chart_image_url: Option<String>,
    pub traded_at: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl From<TradeUpdate> for TradeChangesetDB {
    fn from(domain: TradeUpdate) -> Self {
        Self {
            symbol: domain.symbol,
            direction: domain.direction.as_str().to_string(),
            entry_price: domain.entry_price.map(decimal_to_text),
            exit_price: domain.exit_price.map(decimal_to_text),
            quantity: domain.quantity.map(decimal_to_text),
            profit_loss: decimal_to_text(domain.profit_loss),
            notes: domain.notes,
            chart_image_url: domain.chart_image_url,
            traded_at: domain.traded_at,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<TradeDB> for Trade {
    type Error = Error;

    fn try_from(db: TradeDB) -> Result<Self> {
        Ok(Self {
            direction: TradeDirection::from_str(&db.direction)?,
            entry_price: parse_optional_decimal(db.entry_price.as_deref(), "entry_price")?,
            exit_price: parse_optional_decimal(db.exit_price.as_deref(), "exit_price")?,
            quantity: parse_optional_decimal(db.quantity.as_deref(), "quantity")?,
            profit_loss: parse_decimal(&db.profit_loss, "profit_loss")?,
            profit_loss_percentage: parse_decimal(
                &db.profit_loss_percentage,
                "profit_loss_percentage",
            )?,
            id: db.id,
            user_id: db.user_id,
            symbol: db.symbol,
            notes: db.notes,
            chart_image_url: db.chart_image_url,
            traded_at: db.traded_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
