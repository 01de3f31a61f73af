//! # View State
//!
//! `List` browses a page of summaries; `Detail` shows one article. The
//! detail body is rendered once on entry and dropped on exit, so the
//! renderer runs exactly once per open.

use std::fmt;

use log::warn;
use ratatui::text::Text;

use crate::relay::Article;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The content had text but the renderer produced nothing visible.
    NothingRendered,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NothingRendered => write!(f, "content rendered to nothing"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Converts article markup into display text.
pub trait Render {
    fn render(&self, content: &str) -> Result<Text<'static>, RenderError>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    List,
    Detail(Detail),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    /// Batch index of the open article; equals the cursor at entry.
    pub index: usize,
    pub body: Text<'static>,
    /// True when rendering failed and `body` is the raw content.
    pub is_raw: bool,
}

impl Detail {
    pub fn open(index: usize, article: &Article, renderer: &dyn Render) -> Self {
        match renderer.render(&article.content) {
            Ok(body) => Self {
                index,
                body,
                is_raw: false,
            },
            Err(e) => {
                warn!("Showing raw content for article {}: {}", article.id, e);
                Self {
                    index,
                    body: Text::raw(article.content.clone()),
                    is_raw: true,
                }
            }
        }
    }
}

impl View {
    pub fn is_list(&self) -> bool {
        matches!(self, View::List)
    }

    pub fn detail(&self) -> Option<&Detail> {
        match self {
            View::Detail(detail) => Some(detail),
            View::List => None,
        }
    }
}
