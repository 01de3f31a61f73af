use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    // Keys shared by the list and the detail view
    CursorUp,
    CursorDown,
    NextPage,
    PrevPage,
    Open,
    ToggleHelp,
    Back,
    ForceQuit,

    // Detail-only scrolling (handled directly in TUI)
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    Resize(u16, u16),
}

/// Translate a crossterm event. Returns `None` for anything unbound.
pub fn translate(event: &Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(width, height) => Some(TuiEvent::Resize(*width, *height)),
        _ => None,
    }
}

fn translate_key(key_event: &KeyEvent) -> Option<TuiEvent> {
    // Release/repeat reports only arrive with keyboard enhancement; ignore them
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
        (_, KeyCode::Up | KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down | KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Right | KeyCode::Char('l')) => Some(TuiEvent::NextPage),
        (_, KeyCode::Left | KeyCode::Char('h')) => Some(TuiEvent::PrevPage),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        (_, KeyCode::Enter) => Some(TuiEvent::Open),
        (_, KeyCode::Char('?')) => Some(TuiEvent::ToggleHelp),
        (_, KeyCode::Esc | KeyCode::Char('q')) => Some(TuiEvent::Back),
        _ => None,
    }
}
