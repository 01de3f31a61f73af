//! # Application State
//!
//! Core reader state. No TUI types beyond the rendered article text.
//!
//! ```text
//! App
//! ├── relay_url: String             // shown while loading
//! ├── layout: PageLayout            // row + chrome heights
//! ├── viewport_height: Option<u16>  // last terminal height seen
//! ├── show_help: bool               // full help overlay
//! ├── spinner_frame: usize          // loading animation
//! └── phase: Phase
//!     ├── Loading
//!     ├── Failed(FetchError)
//!     └── Ready(Reader)
//!         ├── batch: Batch          // immutable snapshot
//!         ├── pages: PageState      // cursor + page
//!         └── view: View            // List | Detail
//! ```
//!
//! `PageState` only exists once a batch has arrived. State changes only
//! happen through `update(app, action)` in action.rs.

use crate::core::page::{DEFAULT_VIEWPORT_HEIGHT, PageLayout, PageState};
use crate::core::view::View;
use crate::relay::{Batch, FetchError};

#[derive(Debug, Clone, PartialEq)]
pub struct Reader {
    pub batch: Batch,
    pub pages: PageState,
    pub view: View,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Failed(FetchError),
    Ready(Reader),
}

#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub relay_url: String,
    pub layout: PageLayout,
    pub viewport_height: Option<u16>,
    pub show_help: bool,
    pub spinner_frame: usize,
    pub phase: Phase,
}

impl App {
    pub fn new(relay_url: String, layout: PageLayout) -> Self {
        Self {
            relay_url,
            layout,
            viewport_height: None,
            show_help: false,
            spinner_frame: 0,
            phase: Phase::Loading,
        }
    }

    /// Page size for the last observed terminal height (or the default).
    pub fn page_size(&self) -> usize {
        self.layout
            .page_size_for(self.viewport_height.unwrap_or(DEFAULT_VIEWPORT_HEIGHT))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn reader(&self) -> Option<&Reader> {
        match &self.phase {
            Phase::Ready(reader) => Some(reader),
            _ => None,
        }
    }

    pub fn in_detail(&self) -> bool {
        self.reader().is_some_and(|r| !r.view.is_list())
    }
}
