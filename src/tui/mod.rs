//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, runs the event loop,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! One `tokio::select!` over three sources, one action at a time:
//!
//! - the fetch result, delivered once through a `oneshot` channel
//! - crossterm's `EventStream` (keys, mouse wheel, resize)
//! - an 80ms tick that drives the loading spinner
//!
//! Frames are drawn only after something changed. Once the batch arrives
//! the tick stops causing redraws, so an idle reader does no work.

mod component;
mod components;
mod event;
pub mod format;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use futures::StreamExt;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tui_scrollview::ScrollViewState;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::page::PageLayout;
use crate::core::state::App;
use crate::relay::{Batch, EventSource, FetchError, Filter, RelayClient};
use crate::tui::event::{TuiEvent, translate};
use crate::tui::markdown::MarkdownRenderer;

const TICK: Duration = Duration::from_millis(80);

type FetchResult = Result<Batch, FetchError>;

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    /// Scroll position of the open article. Reset on open and close.
    pub detail_scroll: ScrollViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn EventSource> =
        Arc::new(RelayClient::new(config.relay_url.clone(), config.timeout));
    let filter = Filter::long_form(config.author, config.limit);
    info!(
        "Reading kind {} from {} (author: {}, limit: {})",
        filter.kind,
        config.relay_url,
        config
            .author
            .map(|a| a.to_npub())
            .unwrap_or_else(|| "any".to_string()),
        config.limit
    );
    run_with_source(source, filter, config.layout).await
}

pub async fn run_with_source(
    source: Arc<dyn EventSource>,
    filter: Filter,
    layout: PageLayout,
) -> std::io::Result<()> {
    let mut app = App::new(source.relay_url().to_string(), layout);
    let mut tui = TuiState::new();
    let renderer = MarkdownRenderer::default();

    let (fetch_handle, receiver) = spawn_fetch(source, filter);
    let mut fetch_rx = Some(receiver);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    if let Ok(size) = terminal.size() {
        app = update(app, Action::Resize { height: size.height }, &renderer).0;
    }

    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            let now = chrono::Utc::now().timestamp();
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let action = tokio::select! {
            result = recv_fetch(&mut fetch_rx) => {
                needs_redraw = true;
                Some(match result {
                    Ok(batch) => Action::Loaded(batch),
                    Err(e) => Action::LoadFailed(e),
                })
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => translate(&event).and_then(|event| {
                    needs_redraw = true;
                    to_action(event, &app, &mut tui)
                }),
                Some(Err(e)) => break Err(e),
                None => break Ok(()),
            },
            _ = tick.tick() => app.is_loading().then(|| {
                needs_redraw = true;
                Action::Tick
            }),
        };

        let Some(action) = action else {
            continue;
        };
        if !matches!(action, Action::Tick) {
            debug!("Event loop action: {:?}", action);
        }
        let (next, effect) = update(app, action, &renderer);
        app = next;
        match effect {
            Effect::Quit => break Ok(()),
            Effect::ResetScroll => tui.detail_scroll = ScrollViewState::default(),
            Effect::None => {}
        }
    };

    // Quitting mid-fetch: the receiver is gone, so stop the task too
    fetch_handle.abort();
    ratatui::restore();
    info!("Longform shutting down");
    result
}

fn spawn_fetch(
    source: Arc<dyn EventSource>,
    filter: Filter,
) -> (JoinHandle<()>, oneshot::Receiver<FetchResult>) {
    let (tx, rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let result = source.fetch(&filter).await;
        if tx.send(result).is_err() {
            warn!("Fetch finished after the reader closed; result dropped");
        }
    });
    (handle, rx)
}

/// Resolves once with the fetch result; pending forever afterwards.
async fn recv_fetch(rx: &mut Option<oneshot::Receiver<FetchResult>>) -> FetchResult {
    let Some(receiver) = rx.as_mut() else {
        return std::future::pending().await;
    };
    let result = receiver.await.unwrap_or_else(|_| {
        Err(FetchError::Connection(
            "fetch task ended without a result".to_string(),
        ))
    });
    *rx = None;
    result
}

/// Maps a terminal event to a core action. In the detail view, scrolling
/// is handled here against `TuiState` and produces no action.
fn to_action(event: TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Resize(_, height) => return Some(Action::Resize { height }),
        TuiEvent::ForceQuit => return Some(Action::ForceQuit),
        TuiEvent::Back => return Some(Action::Back),
        TuiEvent::ToggleHelp => return Some(Action::ToggleHelp),
        _ => {}
    }

    if app.in_detail() {
        let scroll = &mut tui.detail_scroll;
        match event {
            TuiEvent::CursorUp | TuiEvent::ScrollUp => scroll.scroll_up(),
            TuiEvent::CursorDown | TuiEvent::ScrollDown => scroll.scroll_down(),
            TuiEvent::ScrollPageUp => scroll.scroll_page_up(),
            TuiEvent::ScrollPageDown => scroll.scroll_page_down(),
            _ => {}
        }
        return None;
    }

    match event {
        TuiEvent::CursorUp | TuiEvent::ScrollUp => Some(Action::Up),
        TuiEvent::CursorDown | TuiEvent::ScrollDown => Some(Action::Down),
        TuiEvent::NextPage | TuiEvent::ScrollPageDown => Some(Action::NextPage),
        TuiEvent::PrevPage | TuiEvent::ScrollPageUp => Some(Action::PrevPage),
        TuiEvent::Open => Some(Action::Open),
        _ => None,
    }
}
