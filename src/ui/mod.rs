//! Terminal user interface
//!
//! The interactive browser is built on ratatui and crossterm. It drives a
//! [`Session`](crate::session::Session) and never touches taxonomy state
//! directly, so everything it shows is also reachable from the library.

pub mod error;
pub mod ratatui_adapter;

pub use error::{Result, UiError};
pub use ratatui_adapter::{Browser, Theme};
