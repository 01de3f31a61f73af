//! # ArticleCard Component
//!
//! One bordered summary of an article in the list:
//!
//! ```text
//! ╭──────────────────────────────────────────────╮
//! │ 3. Why relays matter                         │
//! │ npub1...vjptg · 2 days ago · habla.news      │
//! │ A short tour of how notes get around.        │
//! │ #nostr #relays                               │
//! ╰──────────────────────────────────────────────╯
//! ```
//!
//! Missing metadata is simply left out of the info line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::relay::Article;
use crate::relay::nip19::npub_from_hex;
use crate::tui::component::Component;
use crate::tui::format::{relative_time_or_marker, truncate_end, truncate_middle};

/// Display width of the author's npub.
pub const AUTHOR_WIDTH: usize = 13;
pub const ACCENT: Color = Color::Magenta;
const UNTITLED: &str = "Untitled";

pub struct ArticleCard<'a> {
    pub article: &'a Article,
    /// 1-based position in the whole batch.
    pub number: usize,
    pub selected: bool,
    /// Unix seconds used for relative dates.
    pub now: i64,
}

impl<'a> ArticleCard<'a> {
    pub fn new(article: &'a Article, number: usize, selected: bool, now: i64) -> Self {
        Self {
            article,
            number,
            selected,
            now,
        }
    }

    fn title_line(&self, width: usize) -> Line<'static> {
        let badge = format!("{}. ", self.number);
        let title = self.article.title().unwrap_or(UNTITLED);
        let title = truncate_end(title, width.saturating_sub(badge.len()));
        Line::from(vec![
            Span::styled(badge, Style::default().fg(ACCENT)),
            Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        ])
    }

    fn info_line(&self, width: usize) -> Line<'static> {
        let author =
            npub_from_hex(&self.article.pubkey).unwrap_or_else(|| self.article.pubkey.clone());
        let mut parts = vec![truncate_middle(&author, AUTHOR_WIDTH)];
        if let Some(published) = self.article.published_at() {
            parts.push(relative_time_or_marker(published, self.now));
        }
        if let Some(client) = self.article.client() {
            parts.push(client.to_string());
        }
        let info = truncate_end(&parts.join(" · "), width);
        Line::from(Span::styled(info, Style::default().fg(Color::Gray)))
    }

    fn description_line(&self, width: usize) -> Line<'static> {
        Line::from(Span::styled(
            truncate_end(self.article.description(), width),
            Style::default().fg(Color::DarkGray),
        ))
    }

    fn topics_line(&self, width: usize) -> Option<Line<'static>> {
        let topics: Vec<String> = self.article.topics().map(|t| format!("#{t}")).collect();
        if topics.is_empty() {
            return None;
        }
        Some(Line::from(Span::styled(
            truncate_end(&topics.join(" "), width),
            Style::default().fg(Color::Cyan),
        )))
    }
}

impl Component for ArticleCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.selected {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let width = usize::from(block.inner(area).width);

        let mut lines = vec![
            self.title_line(width),
            self.info_line(width),
            self.description_line(width),
        ];
        lines.extend(self.topics_line(width));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
