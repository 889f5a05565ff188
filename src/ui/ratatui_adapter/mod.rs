//! Ratatui-based tree browser adapter
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Browser                     │
//! │      (terminal setup, event loop)           │
//! └────────────────────┬────────────────────────┘
//!                      │
//!        ┌─────────────┼─────────────┐
//!        ▼             ▼             ▼
//! ┌────────────┐ ┌───────────┐ ┌───────────┐
//! │  Session   │ │  Ratatui  │ │ Crossterm │
//! │  (state)   │ │ (widgets) │ │  (events) │
//! └────────────┘ └───────────┘ └───────────┘
//! ```
//!
//! The session owns all taxonomy state; this module only adds a cursor,
//! a viewport and a background loader.

mod browser;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use browser::Browser;
pub use events::{EventResult, handle_key};
pub use state::ViewState;
pub use theme::Theme;
