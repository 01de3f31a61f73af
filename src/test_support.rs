//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use ratatui::text::Text;

use crate::core::page::PageLayout;
use crate::core::state::App;
use crate::core::view::{Render, RenderError};
use crate::relay::{Article, Batch, EventSource, FetchError, Filter, LONG_FORM_KIND};

pub const TEST_RELAY: &str = "wss://relay.test";

/// Builds an article with a deterministic id and a few metadata tags.
pub fn article(i: usize, title: &str) -> Article {
    Article {
        id: format!("{:064x}", i),
        pubkey: "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e".to_string(),
        created_at: 1_700_000_000 + i as i64,
        kind: LONG_FORM_KIND,
        tags: vec![
            vec!["title".to_string(), title.to_string()],
            vec!["summary".to_string(), format!("Summary of {title}")],
            vec!["published_at".to_string(), "1700000000".to_string()],
            vec!["t".to_string(), "nostr".to_string()],
        ],
        content: format!("# {title}\n\nBody of article {i}."),
        sig: String::new(),
    }
}

pub fn batch_of(n: usize) -> Batch {
    Batch::new((0..n).map(|i| article(i, &format!("Article {i}"))).collect())
}

/// Creates a test App in the loading phase with the default layout.
pub fn test_app() -> App {
    App::new(TEST_RELAY.to_string(), PageLayout::default())
}

/// Renders content as plain text with a visible marker.
pub struct PlainRenderer;

impl Render for PlainRenderer {
    fn render(&self, content: &str) -> Result<Text<'static>, RenderError> {
        Ok(Text::raw(format!("rendered: {}", content)))
    }
}

/// A renderer that always fails.
pub struct FailingRenderer;

impl Render for FailingRenderer {
    fn render(&self, _content: &str) -> Result<Text<'static>, RenderError> {
        Err(RenderError::NothingRendered)
    }
}

/// An `EventSource` that returns a canned result.
pub struct StubSource {
    pub result: Result<Batch, FetchError>,
}

#[async_trait]
impl EventSource for StubSource {
    fn relay_url(&self) -> &str {
        TEST_RELAY
    }

    async fn fetch(&self, _filter: &Filter) -> Result<Batch, FetchError> {
        self.result.clone()
    }
}
