use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A long-form article as delivered by the relay (a NIP-01 event).
///
/// Metadata lives in `tags`, each a key followed by one or more values:
/// `["title", "..."]`, `["t", "rust"]`, `["published_at", "1700000000"]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub pubkey: String,
    pub created_at: i64,
    pub kind: u16,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sig: String,
}

impl Article {
    /// First value of the first tag named `key`.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.first().is_some_and(|k| k == key) && tag.len() > 1)
            .map(|tag| tag[1].as_str())
    }

    /// First values of every tag named `key`, in tag order.
    pub fn tag_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |tag| tag.first().is_some_and(|k| k == key))
            .filter_map(|tag| tag.get(1).map(String::as_str))
    }

    pub fn title(&self) -> Option<&str> {
        self.tag("title")
    }

    pub fn summary(&self) -> Option<&str> {
        self.tag("summary")
    }

    pub fn published_at(&self) -> Option<&str> {
        self.tag("published_at")
    }

    pub fn client(&self) -> Option<&str> {
        self.tag("client")
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.tag_values("t")
    }

    /// First line of the summary, or of the content when there is no summary.
    pub fn description(&self) -> &str {
        let text = self.summary().unwrap_or(&self.content);
        text.lines().next().unwrap_or("")
    }
}

/// The immutable snapshot produced by one completed fetch.
///
/// Order is relay delivery order. Cloning shares the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    articles: Arc<[Article]>,
}

impl Batch {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: articles.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    /// The articles in `range`, clipped to the batch bounds.
    pub fn slice(&self, range: Range<usize>) -> &[Article] {
        let end = range.end.min(self.articles.len());
        let start = range.start.min(end);
        &self.articles[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_with_tags(tags: &[&[&str]]) -> Article {
        Article {
            id: "id".to_string(),
            pubkey: "pk".to_string(),
            created_at: 0,
            kind: 30023,
            tags: tags
                .iter()
                .map(|t| t.iter().map(|s| s.to_string()).collect())
                .collect(),
            content: "First line\nSecond line".to_string(),
            sig: String::new(),
        }
    }

    #[test]
    fn test_tag_returns_first_match() {
        let article = article_with_tags(&[&["title", "One"], &["title", "Two"]]);
        assert_eq!(article.title(), Some("One"));
    }

    #[test]
    fn test_tag_skips_valueless_tags() {
        let article = article_with_tags(&[&["title"], &["title", "Real"]]);
        assert_eq!(article.title(), Some("Real"));
    }

    #[test]
    fn test_missing_tag_is_none() {
        let article = article_with_tags(&[]);
        assert_eq!(article.title(), None);
        assert_eq!(article.published_at(), None);
    }

    #[test]
    fn test_topics_in_order() {
        let article = article_with_tags(&[&["t", "rust"], &["title", "x"], &["t", "nostr"]]);
        assert_eq!(article.topics().collect::<Vec<_>>(), vec!["rust", "nostr"]);
    }

    #[test]
    fn test_description_prefers_summary() {
        let article = article_with_tags(&[&["summary", "Short\nmore"]]);
        assert_eq!(article.description(), "Short");
    }

    #[test]
    fn test_description_falls_back_to_content() {
        let article = article_with_tags(&[]);
        assert_eq!(article.description(), "First line");
    }

    #[test]
    fn test_deserialize_event_json() {
        let json = r#"{
            "id": "abc",
            "pubkey": "def",
            "created_at": 1700000000,
            "kind": 30023,
            "tags": [["title", "Hello"], ["t", "intro"]],
            "content": "Body",
            "sig": "000"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title(), Some("Hello"));
        assert_eq!(article.content, "Body");
    }

    #[test]
    fn test_batch_slice_clips() {
        let batch = Batch::new(vec![article_with_tags(&[]); 3]);
        assert_eq!(batch.slice(1..10).len(), 2);
        assert!(batch.slice(5..8).is_empty());
    }
}
