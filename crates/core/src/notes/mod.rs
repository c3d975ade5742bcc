//! Reflection notes attached to trades.
//!
//! A trade stores its note in a single text column. Structured reflections
//! are written as a small versioned JSON envelope; anything that is not such
//! an envelope (including notes written before reflections existed) reads
//! back as plain text.

mod notes_model;


pub use notes_model::{Reflection, TradeNote, NOTE_FORMAT_VERSION};
