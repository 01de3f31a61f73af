//! # ArticleList Component
//!
//! The current page of cards, stacked top to bottom at a fixed row height.
//! Which indices are on the page and which one is selected both come from
//! `PageState`; this component only lays them out.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::page::PageState;
use crate::relay::Batch;
use crate::tui::component::Component;
use crate::tui::components::article_card::ArticleCard;

pub const EMPTY_MESSAGE: &str = "No articles found.";

pub struct ArticleList<'a> {
    pub batch: &'a Batch,
    pub pages: PageState,
    pub row_height: u16,
    pub now: i64,
}

impl Component for ArticleList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.batch.is_empty() {
            let [row] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(area);
            let empty = Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, row);
            return;
        }

        let range = self.pages.page_range();
        let page = self.batch.slice(range.clone());
        let rows = Layout::vertical(
            page.iter()
                .map(|_| Constraint::Length(self.row_height))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

        let selected = self.pages.selected();
        for (slot, (article, index)) in page.iter().zip(range).enumerate() {
            ArticleCard::new(article, index + 1, selected == Some(index), self.now)
                .render(frame, rows[slot]);
        }
    }
}
