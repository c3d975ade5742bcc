//! Trade Journal Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the trading journal. It is
//! database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod balance;
pub mod config;
pub mod constants;
pub mod errors;
pub mod notes;
pub mod summary;
pub mod trades;

#[cfg(test)]
mod test_support;

pub use config::JournalConfig;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
