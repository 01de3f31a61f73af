//! # TUI Components
//!
//! Every piece of the screen is a `Component`: a struct of props, built
//! fresh each frame by `draw_ui`, that renders into a `Rect`.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (relay + page position)
//! ├── loading.rs       (spinner while fetching)
//! ├── article_list.rs  (one page of cards)
//! ├── article_card.rs  (a single article summary)
//! ├── article_view.rs  (scrollable article body)
//! └── help.rs          (hint bar + full key overlay)
//! ```
//!
//! Components never read `App` directly; `draw_ui` passes what each one
//! needs. Only `ArticleView` mutates anything, and only the scroll state
//! it was lent.

pub mod article_card;
pub mod article_list;
pub mod article_view;
pub mod help;
pub mod loading;
pub mod title_bar;

pub use article_card::ArticleCard;
pub use article_list::ArticleList;
pub use article_view::ArticleView;
pub use help::{HelpBar, HelpOverlay};
pub use loading::LoadingView;
pub use title_bar::TitleBar;
