//! # Help Components
//!
//! `HelpBar` is the one-line hint under the list or article.
//! `HelpOverlay` is the full key table, toggled with `?` and drawn over
//! whatever is underneath.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::tui::component::Component;

/// (keys, description) for the full overlay.
pub const BINDINGS: [(&str, &str); 9] = [
    ("↑ / k", "move up"),
    ("↓ / j", "move down"),
    ("→ / l", "next page"),
    ("← / h", "previous page"),
    ("enter", "open article"),
    ("pgup / pgdn", "scroll article by page"),
    ("?", "toggle this help"),
    ("esc / q", "back, or quit from the list"),
    ("ctrl+c", "quit"),
];

const LIST_HINTS: &[(&str, &str)] = &[
    ("↑↓", "move"),
    ("←→", "page"),
    ("enter", "open"),
    ("?", "more"),
    ("q", "quit"),
];

const DETAIL_HINTS: &[(&str, &str)] = &[
    ("↑↓", "scroll"),
    ("pgup/pgdn", "page"),
    ("esc", "back"),
    ("?", "more"),
];

pub struct HelpBar {
    pub in_detail: bool,
}

impl Component for HelpBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = if self.in_detail {
            DETAIL_HINTS
        } else {
            LIST_HINTS
        };
        let key_style = Style::default().fg(Color::Gray);
        let desc_style = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::with_capacity(hints.len() * 3);
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" • ", desc_style));
            }
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::styled(format!(" {desc}"), desc_style));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

pub struct HelpOverlay;

impl Component for HelpOverlay {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_width = BINDINGS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("{key:<key_width$}  "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ])
            })
            .collect();

        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Keys ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ? or esc to close ").centered())
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(lines).block(block), overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(component: &mut impl Component, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| component.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_help_bar_depends_on_view() {
        let list = screen(&mut HelpBar { in_detail: false }, 80, 1);
        assert!(list.contains("enter open"));
        assert!(list.contains("q quit"));

        let detail = screen(&mut HelpBar { in_detail: true }, 80, 1);
        assert!(detail.contains("esc back"));
        assert!(!detail.contains("enter open"));
    }

    #[test]
    fn test_overlay_lists_every_binding() {
        let text = screen(&mut HelpOverlay, 100, 30);
        assert!(text.contains("Keys"));
        for (_, desc) in BINDINGS {
            assert!(text.contains(desc), "missing {desc}");
        }
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 60, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 20);
        assert_eq!(inner.y, 10);
    }
}
