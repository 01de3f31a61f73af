//! # Pagination
//!
//! Pure cursor/page arithmetic over a batch of `total` articles.
//!
//! ```text
//!   page 0        page 1        page 2 (short)
//! ┌────────────┬────────────┬────────┐
//! │ 0  1  2  3 │ 4  5  6  7 │ 8  9   │   page_size = 4, total = 10
//! └────────────┴────────────┴────────┘
//!                  ^ cursor = 5
//! ```
//!
//! The cursor never leaves its page through up/down; it moves between
//! pages only with `next_page`/`prev_page`, which keep the relative row
//! (clamped on a short last page). Every transition takes and returns a
//! `PageState` by value.

use std::ops::Range;

/// Terminal rows occupied by one article card.
pub const DEFAULT_ROW_HEIGHT: u16 = 9;
/// Rows taken by the title bar and the help bar.
pub const DEFAULT_CHROME_HEIGHT: u16 = 2;
/// Assumed terminal height until the first resize is observed.
pub const DEFAULT_VIEWPORT_HEIGHT: u16 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub row_height: u16,
    pub chrome_height: u16,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            chrome_height: DEFAULT_CHROME_HEIGHT,
        }
    }
}

impl PageLayout {
    /// How many cards fit in a terminal `viewport_height` rows tall. Never 0.
    pub fn page_size_for(&self, viewport_height: u16) -> usize {
        let usable = viewport_height.saturating_sub(self.chrome_height);
        usize::from((usable / self.row_height.max(1)).max(1))
    }
}

/// `ceil(total / page_size)`; an empty batch has zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    total: usize,
    page_size: usize,
    page: usize,
    cursor: usize,
}

impl PageState {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            page: 0,
            cursor: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// The selected article index, or `None` for an empty batch.
    pub fn selected(&self) -> Option<usize> {
        (self.total > 0).then_some(self.cursor)
    }

    /// Article indices shown on the current page.
    pub fn page_range(&self) -> Range<usize> {
        if self.total == 0 {
            return 0..0;
        }
        let start = self.page * self.page_size;
        start..(start + self.page_size).min(self.total)
    }

    pub fn move_cursor_up(self) -> Self {
        if self.total == 0 || self.cursor == self.page_range().start {
            return self;
        }
        Self {
            cursor: self.cursor - 1,
            ..self
        }
    }

    pub fn move_cursor_down(self) -> Self {
        if self.total == 0 || self.cursor + 1 >= self.page_range().end {
            return self;
        }
        Self {
            cursor: self.cursor + 1,
            ..self
        }
    }

    pub fn next_page(self) -> Self {
        if self.total == 0 || self.page + 1 >= self.total_pages() {
            return self;
        }
        Self {
            page: self.page + 1,
            cursor: (self.cursor + self.page_size).min(self.total - 1),
            ..self
        }
    }

    pub fn prev_page(self) -> Self {
        if self.page == 0 {
            return self;
        }
        Self {
            page: self.page - 1,
            cursor: self.cursor - self.page_size,
            ..self
        }
    }

    /// Re-paginate for a new page size, keeping the cursor on the same
    /// article and moving to whichever page now contains it.
    pub fn resize(self, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        if self.total == 0 {
            return Self::new(0, page_size);
        }
        let cursor = self.cursor.min(self.total - 1);
        Self {
            page_size,
            page: cursor / page_size,
            cursor,
            ..self
        }
    }
}
