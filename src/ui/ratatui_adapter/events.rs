//! Event handling for the ratatui TUI
//!
//! Maps keyboard and mouse events to session actions. Printable keys always
//! go to the search box, so every other action sits on a non-printing key.

use super::state::ViewState;
use crate::session::Session;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::{Duration, Instant};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Leave the browser
    Quit,
    /// Reload the taxonomy from its source
    Reload,
    /// No action taken
    Ignored,
}

/// Path of the row under the cursor
fn cursor_path(session: &Session, view: &ViewState) -> Option<crate::taxonomy::NodePath> {
    session.rows().get(view.cursor).map(|row| row.path.clone())
}

/// Right arrow: open the node under the cursor
///
/// A filtered tree is drawn fully open and its flags are reset when the
/// search is cleared, so expansion keys leave the flags alone meanwhile.
fn expand_at_cursor(session: &mut Session, view: &ViewState) -> EventResult {
    let Some(path) = cursor_path(session, view) else {
        return EventResult::Ignored;
    };
    if session.active_query().is_some() {
        return EventResult::Ignored;
    }
    if path.is_expandable() && !session.store().state().is_expanded(&path) {
        session.toggle_expanded(&path);
        EventResult::Continue
    } else {
        EventResult::Ignored
    }
}

/// Left arrow: close the node under the cursor, or jump to its parent
fn collapse_at_cursor(session: &mut Session, view: &mut ViewState) -> EventResult {
    let Some(path) = cursor_path(session, view) else {
        return EventResult::Ignored;
    };
    let filtered = session.active_query().is_some();
    if !filtered && path.is_expandable() && session.store().state().is_expanded(&path) {
        session.toggle_expanded(&path);
        return EventResult::Continue;
    }
    let Some(parent) = path.parent() else {
        return EventResult::Ignored;
    };
    if let Some(index) = session.rows().iter().position(|row| row.path == parent) {
        view.jump_to(index);
    }
    EventResult::Continue
}

/// Handle a key press
pub fn handle_key(session: &mut Session, view: &mut ViewState, key: KeyEvent, now: Instant) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,
        (KeyCode::Esc, _) => {
            if session.input().is_empty() {
                EventResult::Quit
            } else {
                session.clear_search(now);
                EventResult::Continue
            }
        }

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
            view.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
            view.cursor_down();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            view.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            view.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            view.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            view.jump_to_end();
            EventResult::Continue
        }
        (KeyCode::Right, _) => expand_at_cursor(session, view),
        (KeyCode::Left, _) => collapse_at_cursor(session, view),

        // Selection
        (KeyCode::Enter | KeyCode::Tab, _) => {
            let activated = cursor_path(session, view).is_some_and(|path| session.activate(&path));
            if activated {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => {
            if session.clear_selection() {
                EventResult::Continue
            } else {
                EventResult::Ignored
            }
        }

        // Loading
        (KeyCode::Char('r'), KeyModifiers::CONTROL) | (KeyCode::F(5), _) => EventResult::Reload,

        // Query editing
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            session.push_char(c, now);
            EventResult::Continue
        }
        (KeyCode::Backspace, _) => {
            if session.input().is_empty() {
                EventResult::Ignored
            } else {
                session.pop_char(now);
                EventResult::Continue
            }
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            session.clear_search(now);
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle mouse events
fn handle_mouse(view: &mut ViewState, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            view.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            view.cursor_down();
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// Waits at most `timeout` for an event.
///
/// # Errors
///
/// Returns an I/O error if reading terminal events fails.
pub fn poll_and_handle(
    session: &mut Session,
    view: &mut ViewState,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            handle_key(session, view, key, Instant::now())
        }
        Event::Mouse(mouse) => handle_mouse(view, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}
