use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::{TradeChangesetDB, TradeDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::trades;
use tradejournal_core::balance::AnnotatedTrade;
use tradejournal_core::errors::Result;
use tradejournal_core::trades::{NewTrade, Trade, TradeRepositoryTrait, TradeUpdate};

/// Repository for managing trade data in the database
pub struct TradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

/// Time-ordered ID, so trades sharing a timestamp still list in insertion order.
fn new_trade_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// First `created_at` a new row for `user_ids` may take: the current time,
/// or one microsecond after the latest stored trade of those users when
/// that is later. Must run on the writer connection.
fn next_created_at(conn: &mut SqliteConnection, user_ids: &[&str]) -> Result<NaiveDateTime> {
    let now = chrono::Utc::now().naive_utc();
    let latest = trades::table
        .filter(trades::user_id.eq_any(user_ids.to_vec()))
        .select(max(trades::created_at))
        .first::<Option<NaiveDateTime>>(conn)
        .into_core()?;

    Ok(match latest {
        Some(latest) if latest >= now => latest + Duration::microseconds(1),
        _ => now,
    })
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    async fn create(&self, new_trade: AnnotatedTrade<NewTrade>) -> Result<Trade> {
        new_trade.trade.validate()?;

        self.writer
            .exec(move |conn| {
                let created_at = next_created_at(conn, &[new_trade.trade.user_id.as_str()])?;
                let trade_db = TradeDB::from_new(new_trade, new_trade_id(), created_at);

                diesel::insert_into(trades::table)
                    .values(&trade_db)
                    .execute(conn)
                    .into_core()?;

                trade_db.try_into()
            })
            .await
    }

    async fn create_many(&self, new_trades: Vec<AnnotatedTrade<NewTrade>>) -> Result<Vec<Trade>> {
        for new_trade in &new_trades {
            new_trade.trade.validate()?;
        }
        if new_trades.is_empty() {
            return Ok(Vec::new());
        }

        self.writer
            .exec(move |conn| {
                let user_ids: Vec<&str> =
                    new_trades.iter().map(|t| t.trade.user_id.as_str()).collect();
                let start = next_created_at(conn, &user_ids)?;
                // One microsecond apart keeps the batch order in `created_at`.
                let rows: Vec<TradeDB> = new_trades
                    .into_iter()
                    .enumerate()
                    .map(|(i, new_trade)| {
                        TradeDB::from_new(
                            new_trade,
                            new_trade_id(),
                            start + Duration::microseconds(i as i64),
                        )
                    })
                    .collect();

                diesel::insert_into(trades::table)
                    .values(&rows)
                    .execute(conn)
                    .into_core()?;
                debug!("Inserted {} trades", rows.len());

                rows.into_iter().map(Trade::try_from).collect()
            })
            .await
    }

    async fn update(&self, trade_update: TradeUpdate) -> Result<Trade> {
        trade_update.validate()?;

        self.writer
            .exec(move |conn| {
                let target_id = trade_update.id.clone();
                let changes: TradeChangesetDB = trade_update.into();

                let updated = diesel::update(trades::table.find(&target_id))
                    .set(&changes)
                    .returning(TradeDB::as_returning())
                    .get_result::<TradeDB>(conn)
                    .into_core()?;

                updated.try_into()
            })
            .await
    }

    async fn delete(&self, trade_id: &str) -> Result<usize> {
        let target_id = trade_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(trades::table.find(target_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, trade_id: &str) -> Result<Trade> {
        let mut conn = get_connection(&self.pool)?;

        let trade = trades::table
            .select(TradeDB::as_select())
            .find(trade_id)
            .first::<TradeDB>(&mut conn)
            .into_core()?;

        trade.try_into()
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = trades::table
            .filter(trades::user_id.eq(user_id))
            .order((trades::created_at.asc(), trades::id.asc()))
            .select(TradeDB::as_select())
            .load::<TradeDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(Trade::try_from).collect()
    }
}
