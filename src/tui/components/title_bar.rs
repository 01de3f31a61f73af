//! # TitleBar Component
//!
//! One-line bar above the article list: app name, relay, page position.
//!
//! ```text
//! Longform | wss://relay.damus.io | page 2/6
//! ```
//!
//! Stateless: every field is a prop handed in by `draw_ui`. Page numbers
//! are 1-based here; an empty batch shows `page 0/0`.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar<'a> {
    pub relay_url: &'a str,
    /// Zero-based current page.
    pub page: usize,
    pub total_pages: usize,
}

impl<'a> TitleBar<'a> {
    pub fn new(relay_url: &'a str, page: usize, total_pages: usize) -> Self {
        Self {
            relay_url,
            page,
            total_pages,
        }
    }

    pub fn page_label(&self) -> String {
        let current = if self.total_pages == 0 { 0 } else { self.page + 1 };
        format!("page {}/{}", current, self.total_pages)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let line = Line::from(vec![
            Span::styled(
                "Longform",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            separator.clone(),
            Span::raw(self.relay_url.to_string()),
            separator,
            Span::raw(self.page_label()),
        ]);
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut bar: TitleBar<'_>) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_shows_relay_and_page() {
        let text = rendered(TitleBar::new("wss://relay.test", 1, 6));
        assert!(text.starts_with("Longform | wss://relay.test | page 2/6"));
    }

    #[test]
    fn test_title_bar_empty_batch() {
        let bar = TitleBar::new("wss://relay.test", 0, 0);
        assert_eq!(bar.page_label(), "page 0/0");
    }
}
