//! # Relay Access
//!
//! Everything that talks to (or describes data from) a Nostr relay.
//!
//! - [`source`]: the `EventSource` trait and `FetchError`
//! - [`client`]: `RelayClient`, the websocket implementation
//! - [`message`]: NIP-01 wire messages
//! - [`filter`]: the subscription filter
//! - [`event`]: `Article` and `Batch`
//! - [`nip19`]: `npub` encoding of public keys

pub mod client;
pub mod event;
pub mod filter;
pub mod message;
pub mod nip19;
pub mod source;

pub use client::{DEFAULT_FETCH_TIMEOUT, RelayClient};
pub use event::{Article, Batch};
pub use filter::{Filter, LONG_FORM_KIND};
pub use nip19::PublicKey;
pub use source::{EventSource, FetchError};
