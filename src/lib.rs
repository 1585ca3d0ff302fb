// Export modules for use in tests
pub mod app;
pub mod document;
pub mod export;
pub mod highlight;
pub mod notification;
pub mod panic_handler;
pub mod scroll;
pub mod search;
pub mod search_engine;
pub mod settings;
pub mod theme;
pub mod viewer;
pub mod widget;

pub mod test_utils;

pub use app::App;
pub use document::{Document, Navigator, TextSpan};
pub use search::SearchSession;
pub use search_engine::{Match, PageMatchIndex, SearchResults, find_matches};
