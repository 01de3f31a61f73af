use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::event::Batch;
use super::filter::Filter;

/// Why a fetch produced no batch. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Relay unreachable, handshake failed, or the socket dropped before EOSE.
    Connection(String),
    /// The relay refused the subscription (`CLOSED`).
    Subscription(String),
    /// No EOSE within the configured bound.
    Timeout(Duration),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Connection(msg) => write!(f, "connection error: {msg}"),
            FetchError::Subscription(msg) => write!(f, "subscription rejected: {msg}"),
            FetchError::Timeout(after) => {
                write!(f, "timed out after {}s waiting for the relay", after.as_secs())
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// A one-shot snapshot read of stored events.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Address shown while loading.
    fn relay_url(&self) -> &str;

    /// Collects every event matching `filter` up to end-of-stored-events.
    async fn fetch(&self, filter: &Filter) -> Result<Batch, FetchError>;
}
