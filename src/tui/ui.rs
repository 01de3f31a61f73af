use crate::core::state::{App, Phase, Reader};
use crate::core::view::View;
use crate::relay::FetchError;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ArticleList, ArticleView, HelpBar, HelpOverlay, LoadingView, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

const UNTITLED: &str = "Untitled";

/// Draws one frame. `now` is unix seconds, for relative dates on cards.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: i64) {
    let area = frame.area();
    match &app.phase {
        Phase::Loading => LoadingView::new(&app.relay_url, app.spinner_frame).render(frame, area),
        Phase::Failed(error) => draw_error_view(frame, area, error),
        Phase::Ready(reader) => draw_reader(frame, area, app, reader, tui, now),
    }

    if app.show_help {
        HelpOverlay.render(frame, area);
    }
}

fn draw_reader(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    reader: &Reader,
    tui: &mut TuiState,
    now: i64,
) {
    use Constraint::{Length, Min};

    match &reader.view {
        View::List => {
            let [title_area, list_area, help_area] =
                Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
            TitleBar::new(
                &app.relay_url,
                reader.pages.page(),
                reader.pages.total_pages(),
            )
            .render(frame, title_area);
            ArticleList {
                batch: &reader.batch,
                pages: reader.pages,
                row_height: app.layout.row_height,
                now,
            }
            .render(frame, list_area);
            HelpBar { in_detail: false }.render(frame, help_area);
        }
        View::Detail(detail) => {
            let [body_area, help_area] = Layout::vertical([Min(0), Length(1)]).areas(area);
            let title = reader
                .batch
                .get(detail.index)
                .and_then(|a| a.title())
                .unwrap_or(UNTITLED);
            ArticleView {
                title,
                body: &detail.body,
                is_raw: detail.is_raw,
                state: &mut tui.detail_scroll,
            }
            .render(frame, body_area);
            HelpBar { in_detail: true }.render(frame, help_area);
        }
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error: &FetchError) {
    let width = area.width.saturating_sub(4).min(72);
    let [row] = Layout::vertical([Constraint::Length(6)])
        .flex(Flex::Center)
        .areas(area);
    let [boxed] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let error_paragraph = Paragraph::new(vec![
        Line::from(error.to_string()),
        Line::default(),
        Line::styled("press q to quit", Style::default().fg(Color::DarkGray)),
    ])
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title("ERROR"),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, boxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{PlainRenderer, batch_of, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const NOW: i64 = 1_700_000_000;

    fn screen(app: &App, tui: &mut TuiState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, NOW)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn apply(app: App, actions: impl IntoIterator<Item = Action>) -> App {
        actions
            .into_iter()
            .fold(app, |app, action| update(app, action, &PlainRenderer).0)
    }

    #[test]
    fn test_loading_screen() {
        let rows = screen(&test_app(), &mut TuiState::new(), 60, 24);
        assert!(rows.iter().any(|r| r.contains("fetching from wss://relay.test")));
    }

    #[test]
    fn test_error_screen() {
        let app = apply(
            test_app(),
            [Action::LoadFailed(FetchError::Connection("refused".to_string()))],
        );
        let text = screen(&app, &mut TuiState::new(), 80, 24).join("\n");
        assert!(text.contains("ERROR"));
        assert!(text.contains("connection error: refused"));
        assert!(text.contains("press q to quit"));
    }

    #[test]
    fn test_list_screen() {
        let app = apply(
            test_app(),
            [Action::Resize { height: 38 }, Action::Loaded(batch_of(23))],
        );
        let rows = screen(&app, &mut TuiState::new(), 60, 38);
        assert!(rows[0].starts_with("Longform | wss://relay.test | page 1/6"));
        let body = rows.join("\n");
        assert!(body.contains("1. Article 0"));
        assert!(body.contains("4. Article 3"));
        assert!(!body.contains("5. Article 4"));
        assert!(rows[37].contains("enter open"));
    }

    #[test]
    fn test_empty_batch_screen() {
        let app = apply(test_app(), [Action::Loaded(batch_of(0))]);
        let rows = screen(&app, &mut TuiState::new(), 60, 24);
        assert!(rows[0].contains("page 0/0"));
        assert!(rows.join("\n").contains("No articles found."));
    }

    #[test]
    fn test_detail_screen() {
        let app = apply(
            test_app(),
            [Action::Loaded(batch_of(3)), Action::Down, Action::Open],
        );
        let rows = screen(&app, &mut TuiState::new(), 60, 24);
        assert!(rows[0].contains("Article 1"));
        assert!(rows[1].starts_with("rendered: # Article 1"));
        assert!(rows[22].ends_with("100%"));
        assert!(rows[23].contains("esc back"));
    }

    #[test]
    fn test_help_overlay_drawn_over_list() {
        let app = apply(
            test_app(),
            [Action::Loaded(batch_of(3)), Action::ToggleHelp],
        );
        let text = screen(&app, &mut TuiState::new(), 80, 30).join("\n");
        assert!(text.contains("Keys"));
        assert!(text.contains("previous page"));
    }
}
