//! Trades module - domain models, services, and traits.

mod trades_model;
mod trades_service;
mod trades_traits;


pub use trades_model::{NewTrade, Trade, TradeDirection, TradeUpdate};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
