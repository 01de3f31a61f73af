//! # Core Application Logic
//!
//! The reader's business logic. It knows nothing about terminals beyond
//! the rendered article text it caches.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Page (cursor math)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. Pure.          │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   relay    │
//!           │  Adapter   │              │  (fetch)   │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all reader state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`page`]: Pagination over a fetched batch
//! - [`view`]: List vs. detail view
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod page;
pub mod state;
pub mod view;
