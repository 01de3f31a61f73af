//! # Loading Component
//!
//! Centered "fetching from <relay>" line with a braille spinner, shown
//! until the relay answers.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView<'a> {
    pub relay_url: &'a str,
    pub spinner_frame: usize,
}

impl<'a> LoadingView<'a> {
    pub fn new(relay_url: &'a str, spinner_frame: usize) -> Self {
        Self {
            relay_url,
            spinner_frame,
        }
    }
}

impl Component for LoadingView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [row] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(area);
        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let line = Line::from(vec![
            Span::raw(format!("fetching from {}  ", self.relay_url)),
            Span::styled(spinner, Style::default().fg(Color::Magenta)),
        ])
        .centered();
        frame.render_widget(line, row);
    }
}
