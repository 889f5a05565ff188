//! Ratatui widgets for the tree browser

mod help_bar;
mod search_bar;
mod status_bar;
mod tree_list;

pub use help_bar::{HelpBar, HintContext};
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
pub use tree_list::TreeList;
