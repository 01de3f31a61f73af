use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Props are struct fields, borrowed from `App` or `TuiState` for the
/// length of one frame. `render` takes `&mut self` so a component can
/// update presentation state it borrows (e.g. a scroll offset) while
/// drawing, the same way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
