//! # Actions
//!
//! Everything that can happen in the reader becomes an `Action`.
//! User presses `→`? That's `Action::NextPage`.
//! Relay finishes? That's `Action::Loaded(batch)`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state plus an `Effect` for the adapter to carry
//! out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  (New State, Effect)
//! ```
//!
//! The only collaborator is the article renderer, called once when an
//! article is opened.

use log::{debug, info, warn};

use crate::core::page::PageState;
use crate::core::state::{App, Phase, Reader};
use crate::core::view::{Detail, Render, View};
use crate::relay::{Batch, FetchError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Results of the one-shot fetch
    Loaded(Batch),
    LoadFailed(FetchError),

    // Terminal
    Resize { height: u16 },
    Tick,

    // User
    Up,
    Down,
    NextPage,
    PrevPage,
    Open,
    ToggleHelp,
    /// Leave the current view: detail → list, otherwise quit.
    Back,
    ForceQuit,
}

/// Side effects the adapter performs after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// A detail body was opened or closed; reset its scroll position.
    ResetScroll,
}

pub fn update(mut app: App, action: Action, renderer: &dyn Render) -> (App, Effect) {
    let effect = match action {
        Action::Loaded(batch) => {
            if app.is_loading() {
                let pages = PageState::new(batch.len(), app.page_size());
                info!(
                    "Loaded {} articles ({} per page, {} pages)",
                    batch.len(),
                    pages.page_size(),
                    pages.total_pages()
                );
                app.phase = Phase::Ready(Reader {
                    batch,
                    pages,
                    view: View::List,
                });
            } else {
                warn!("Ignoring batch delivered outside the loading phase");
            }
            Effect::None
        }
        Action::LoadFailed(error) => {
            if app.is_loading() {
                warn!("Fetch failed: {}", error);
                app.phase = Phase::Failed(error);
            } else {
                warn!("Ignoring fetch error outside the loading phase: {}", error);
            }
            Effect::None
        }
        Action::Resize { height } => {
            app.viewport_height = Some(height);
            let page_size = app.page_size();
            if let Phase::Ready(reader) = &mut app.phase {
                reader.pages = reader.pages.resize(page_size);
                debug!(
                    "Resized to {} rows: page {}/{}, cursor {}",
                    height,
                    reader.pages.page() + 1,
                    reader.pages.total_pages(),
                    reader.pages.cursor()
                );
            }
            Effect::None
        }
        Action::Tick => {
            if app.is_loading() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            Effect::None
        }
        Action::Up => navigate(&mut app, PageState::move_cursor_up),
        Action::Down => navigate(&mut app, PageState::move_cursor_down),
        Action::NextPage => navigate(&mut app, PageState::next_page),
        Action::PrevPage => navigate(&mut app, PageState::prev_page),
        Action::Open => {
            if let Phase::Ready(reader) = &mut app.phase
                && reader.view.is_list()
                && let Some(index) = reader.pages.selected()
                && let Some(article) = reader.batch.get(index)
            {
                info!("Opening article {} ({})", index, article.id);
                reader.view = View::Detail(Detail::open(index, article, renderer));
                Effect::ResetScroll
            } else {
                Effect::None
            }
        }
        // The error screen only quits
        Action::ToggleHelp if matches!(app.phase, Phase::Failed(_)) => Effect::None,
        Action::ToggleHelp => {
            app.show_help = !app.show_help;
            Effect::None
        }
        Action::Back => {
            if app.show_help {
                app.show_help = false;
                Effect::None
            } else if let Phase::Ready(reader) = &mut app.phase
                && !reader.view.is_list()
            {
                reader.view = View::List;
                Effect::ResetScroll
            } else {
                Effect::Quit
            }
        }
        Action::ForceQuit => Effect::Quit,
    };
    (app, effect)
}

/// Applies a page transition, only while browsing the list.
fn navigate(app: &mut App, step: fn(PageState) -> PageState) -> Effect {
    if let Phase::Ready(reader) = &mut app.phase
        && reader.view.is_list()
    {
        reader.pages = step(reader.pages);
    }
    Effect::None
}
