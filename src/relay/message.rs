//! NIP-01 wire messages.
//!
//! Client → relay: `["REQ", sub_id, filter]`, `["CLOSE", sub_id]`.
//! Relay → client: `EVENT`, `EOSE`, `CLOSED`, `NOTICE` (anything else is
//! kept as `Unknown` and ignored by the client).

use std::fmt;

use serde_json::{Value, json};

use crate::relay::event::Article;
use crate::relay::filter::Filter;

#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    Event {
        subscription_id: String,
        event: Box<Article>,
    },
    EndOfStoredEvents {
        subscription_id: String,
    },
    Closed {
        subscription_id: String,
        message: String,
    },
    Notice(String),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Not a JSON array with a string label.
    NotAnArray(String),
    /// Known label, wrong shape.
    Malformed { label: String, reason: String },
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::NotAnArray(e) => write!(f, "not a relay message: {e}"),
            MessageError::Malformed { label, reason } => {
                write!(f, "malformed {label} message: {reason}")
            }
        }
    }
}

impl std::error::Error for MessageError {}

impl RelayMessage {
    pub fn parse(text: &str) -> Result<Self, MessageError> {
        let parts: Vec<Value> =
            serde_json::from_str(text).map_err(|e| MessageError::NotAnArray(e.to_string()))?;
        let label = parts
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| MessageError::NotAnArray("missing label".to_string()))?
            .to_string();

        let malformed = |reason: &str| MessageError::Malformed {
            label: label.clone(),
            reason: reason.to_string(),
        };
        let string_at = |index: usize| {
            parts
                .get(index)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        match label.as_str() {
            "EVENT" => {
                let subscription_id =
                    string_at(1).ok_or_else(|| malformed("missing subscription id"))?;
                let raw = parts.get(2).cloned().ok_or_else(|| malformed("missing event"))?;
                let event: Article =
                    serde_json::from_value(raw).map_err(|e| malformed(&e.to_string()))?;
                Ok(RelayMessage::Event {
                    subscription_id,
                    event: Box::new(event),
                })
            }
            "EOSE" => Ok(RelayMessage::EndOfStoredEvents {
                subscription_id: string_at(1).ok_or_else(|| malformed("missing subscription id"))?,
            }),
            "CLOSED" => Ok(RelayMessage::Closed {
                subscription_id: string_at(1).ok_or_else(|| malformed("missing subscription id"))?,
                message: string_at(2).unwrap_or_default(),
            }),
            "NOTICE" => Ok(RelayMessage::Notice(string_at(1).unwrap_or_default())),
            _ => Ok(RelayMessage::Unknown(label.clone())),
        }
    }
}

/// `["REQ", sub_id, filter]`
pub fn req(subscription_id: &str, filter: &Filter) -> String {
    json!(["REQ", subscription_id, filter.to_json()]).to_string()
}

/// `["CLOSE", sub_id]`
pub fn close(subscription_id: &str) -> String {
    json!(["CLOSE", subscription_id]).to_string()
}
