//! # ArticleView Component
//!
//! Full-screen reader for one article:
//!
//! ```text
//! Why relays matter ──────────────────────────
//! <wrapped, scrollable body>
//! ───────────────────────────────────────  42%
//! ```
//!
//! The body is the `Text` rendered once when the article was opened. The
//! scroll position lives in `TuiState` and is clamped here every frame so
//! a shrinking terminal never leaves it past the end.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;
use crate::tui::components::article_card::ACCENT;

pub struct ArticleView<'a> {
    pub title: &'a str,
    pub body: &'a Text<'static>,
    /// Rendering failed and the body is raw Markdown.
    pub is_raw: bool,
    pub state: &'a mut ScrollViewState,
}

/// How far through the body the view is, 0-100. Content that fits is 100%.
pub fn scroll_percent(offset: u16, content_height: u16, viewport_height: u16) -> u16 {
    let max = content_height.saturating_sub(viewport_height);
    if max == 0 {
        return 100;
    }
    let ratio = u32::from(offset.min(max)) * 100 / u32::from(max);
    ratio as u16
}

fn rule(width: u16, used: usize) -> Span<'static> {
    let len = usize::from(width).saturating_sub(used);
    Span::styled("─".repeat(len), Style::default().fg(ACCENT))
}

impl Component for ArticleView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        // Header
        let mut title = format!(" {} ", self.title);
        if self.is_raw {
            title.push_str("(raw) ");
        }
        let header = Line::from(vec![
            Span::styled(
                title.clone(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            rule(area.width, title.width()),
        ]);
        frame.render_widget(header, header_area);

        // Body, one column reserved for the scrollbar
        let content_width = body_area.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.body.clone()).wrap(Wrap { trim: false });
        let content_height =
            u16::try_from(paragraph.line_count(content_width)).unwrap_or(u16::MAX);

        let max_y = content_height.saturating_sub(body_area.height);
        let offset = self.state.offset();
        if offset.y > max_y {
            self.state.set_offset(Position { x: 0, y: max_y });
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, body_area, &mut *self.state);

        // Footer
        let percent = scroll_percent(self.state.offset().y, content_height, body_area.height);
        let info = format!(" {percent:>3}%");
        let footer = Line::from(vec![
            rule(area.width, info.width()),
            Span::styled(info, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(footer, footer_area);
    }
}
