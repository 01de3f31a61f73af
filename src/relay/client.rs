//! Websocket relay client.
//!
//! Opens one connection, sends one `REQ`, accumulates matching `EVENT`s in
//! arrival order and returns them when the relay sends `EOSE`. The
//! subscription is closed right there; nothing live is ever read.

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::relay::event::{Article, Batch};
use crate::relay::filter::Filter;
use crate::relay::message::{self, RelayMessage};
use crate::relay::source::{EventSource, FetchError};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct RelayClient {
    url: String,
    timeout: Duration,
}

impl RelayClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    async fn collect(&self, filter: &Filter) -> Result<Batch, FetchError> {
        info!("Connecting to relay {}", self.url);
        let (mut socket, _response) = connect_async(self.url.as_str())
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let subscription_id = uuid::Uuid::new_v4().simple().to_string();
        let request = message::req(&subscription_id, filter);
        debug!("Sending {}", request);
        socket
            .send(Message::text(request))
            .await
            .map_err(|e| FetchError::Connection(e.to_string()))?;

        let mut articles: Vec<Article> = Vec::new();
        let mut dropped = 0usize;

        while let Some(frame) = socket.next().await {
            let frame = frame.map_err(|e| FetchError::Connection(e.to_string()))?;
            let text = match frame {
                Message::Text(text) => text,
                Message::Close(reason) => {
                    debug!("Relay sent close frame: {:?}", reason);
                    break;
                }
                _ => continue,
            };

            match RelayMessage::parse(&text) {
                Ok(RelayMessage::Event {
                    subscription_id: id,
                    event,
                }) if id == subscription_id => {
                    if filter.max_events().is_some_and(|max| articles.len() >= max) {
                        dropped += 1;
                        continue;
                    }
                    articles.push(*event);
                }
                Ok(RelayMessage::EndOfStoredEvents {
                    subscription_id: id,
                }) if id == subscription_id => {
                    info!(
                        "End of stored events: {} articles ({} over limit dropped)",
                        articles.len(),
                        dropped
                    );
                    close_subscription(&mut socket, &subscription_id).await;
                    return Ok(Batch::new(articles));
                }
                Ok(RelayMessage::Closed {
                    subscription_id: id,
                    message,
                }) if id == subscription_id => {
                    warn!("Relay closed subscription: {}", message);
                    if let Err(e) = socket.close(None).await {
                        debug!("Websocket close failed: {}", e);
                    }
                    return Err(FetchError::Subscription(message));
                }
                Ok(RelayMessage::Notice(notice)) => info!("Relay notice: {}", notice),
                Ok(other) => debug!("Ignoring relay message: {:?}", other),
                Err(e) => warn!("Skipping relay message: {}", e),
            }
        }

        warn!(
            "Connection ended before end of stored events ({} articles received)",
            articles.len()
        );
        Err(FetchError::Connection(
            "relay closed the connection before end of stored events".to_string(),
        ))
    }
}

async fn close_subscription(socket: &mut Socket, subscription_id: &str) {
    if let Err(e) = socket.send(Message::text(message::close(subscription_id))).await {
        debug!("CLOSE not delivered: {}", e);
    }
    if let Err(e) = socket.close(None).await {
        debug!("Websocket close failed: {}", e);
    }
}

#[async_trait]
impl EventSource for RelayClient {
    fn relay_url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self, filter: &Filter) -> Result<Batch, FetchError> {
        match tokio::time::timeout(self.timeout, self.collect(filter)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Fetch from {} timed out after {:?}", self.url, self.timeout);
                Err(FetchError::Timeout(self.timeout))
            }
        }
    }
}
