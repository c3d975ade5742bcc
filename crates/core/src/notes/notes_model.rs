use log::warn;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Envelope version written by [`TradeNote::encode`].
pub const NOTE_FORMAT_VERSION: u32 = 1;

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Structured post-trade reflection form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reflection {
    /// Why the trade was taken.
    pub setup: String,
    /// How entry, management and exit went.
    pub execution: String,
    pub emotions: String,
    pub lessons: String,
    /// Self-assessed quality from 1 to 5.
    pub rating: Option<u8>,
    pub followed_plan: Option<bool>,
}

impl Reflection {
    pub fn validate(&self) -> Result<()> {
        match self.rating {
            Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
                Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "Rating must be between {} and {}, got {}",
                    MIN_RATING, MAX_RATING, rating
                ))))
            }
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.setup.trim().is_empty()
            && self.execution.trim().is_empty()
            && self.emotions.trim().is_empty()
            && self.lessons.trim().is_empty()
            && self.rating.is_none()
            && self.followed_plan.is_none()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteEnvelope {
    journal_note: u32,
    reflection: Reflection,
}

/// Note text attached to a trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeNote {
    Structured(Reflection),
    PlainText(String),
}

impl Default for TradeNote {
    fn default() -> Self {
        TradeNote::PlainText(String::new())
    }
}

impl TradeNote {
    /// Reads a stored note. Never fails: text that is not a recognised
    /// envelope is returned verbatim as plain text.
    pub fn decode(text: &str) -> Self {
        let trimmed = text.trim();
        if !trimmed.starts_with('{') {
            return TradeNote::PlainText(text.to_string());
        }

        match serde_json::from_str::<NoteEnvelope>(trimmed) {
            Ok(envelope) if envelope.journal_note == NOTE_FORMAT_VERSION => {
                TradeNote::Structured(envelope.reflection)
            }
            Ok(envelope) => {
                warn!(
                    "Unsupported note format version {}, keeping note as plain text",
                    envelope.journal_note
                );
                TradeNote::PlainText(text.to_string())
            }
            Err(_) => TradeNote::PlainText(text.to_string()),
        }
    }

    /// Text to store for this note, or `None` when there is nothing to store.
    pub fn encode(&self) -> Option<String> {
        match self {
            TradeNote::PlainText(text) if text.trim().is_empty() => None,
            TradeNote::PlainText(text) => Some(text.clone()),
            TradeNote::Structured(reflection) if reflection.is_empty() => None,
            TradeNote::Structured(reflection) => {
                let envelope = NoteEnvelope {
                    journal_note: NOTE_FORMAT_VERSION,
                    reflection: reflection.clone(),
                };
                // Only string, integer and bool fields: serialization cannot fail.
                serde_json::to_string(&envelope).ok()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            TradeNote::Structured(reflection) => reflection.validate(),
            TradeNote::PlainText(_) => Ok(()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, TradeNote::Structured(_))
    }

    /// Human-readable rendering, one labelled line per filled-in section.
    pub fn summary_text(&self) -> String {
        match self {
            TradeNote::PlainText(text) => text.trim().to_string(),
            TradeNote::Structured(reflection) => {
                let mut lines = Vec::new();
                for (label, value) in [
                    ("Setup", &reflection.setup),
                    ("Execution", &reflection.execution),
                    ("Emotions", &reflection.emotions),
                    ("Lessons", &reflection.lessons),
                ] {
                    if !value.trim().is_empty() {
                        lines.push(format!("{}: {}", label, value.trim()));
                    }
                }
                if let Some(followed) = reflection.followed_plan {
                    lines.push(format!(
                        "Followed plan: {}",
                        if followed { "yes" } else { "no" }
                    ));
                }
                if let Some(rating) = reflection.rating {
                    lines.push(format!("Rating: {}/{}", rating, MAX_RATING));
                }
                lines.join("\n")
            }
        }
    }
}

impl From<Reflection> for TradeNote {
    fn from(reflection: Reflection) -> Self {
        TradeNote::Structured(reflection)
    }
}

impl From<String> for TradeNote {
    fn from(text: String) -> Self {
        TradeNote::PlainText(text)
    }
}
