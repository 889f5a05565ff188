//! One-line key reference under the status bar
//!
//! The hints follow what the keys would actually do right now: Enter reads
//! "deselect" on the selected row and disappears on locked rows, the arrows
//! drop out while a query forces the tree open, and Esc names whichever of
//! its two meanings applies.

use crate::session::Session;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::view::Row;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Browser state the hints depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HintContext {
    /// The search box has text, so Esc clears it instead of quitting
    pub editing: bool,
    /// A query is applied and every kept node is drawn open
    pub filtered: bool,
    pub has_selection: bool,
    /// The row under the cursor holds the selection
    pub cursor_selected: bool,
    /// The row under the cursor can be activated
    pub cursor_selectable: bool,
    pub loading: bool,
}

impl HintContext {
    #[must_use]
    pub fn new(session: &Session, cursor_row: Option<&Row<'_>>) -> Self {
        Self {
            editing: !session.input().is_empty(),
            filtered: session.active_query().is_some(),
            has_selection: session.store().state().has_selection(),
            cursor_selected: cursor_row.is_some_and(|row| row.selected),
            cursor_selectable: cursor_row.is_some_and(|row| row.selectable),
            loading: session.is_loading(),
        }
    }

    /// `(key, action)` pairs in display order
    #[must_use]
    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let mut hints = vec![("↑↓", "move")];
        if !self.filtered {
            hints.push(("→←", "open/close"));
        }
        if self.cursor_selected {
            hints.push(("enter", "deselect"));
        } else if self.cursor_selectable {
            hints.push(("enter", "select"));
        }
        if self.has_selection {
            hints.push(("ctrl+x", "clear selection"));
        }
        if !self.loading {
            hints.push(("ctrl+r", "reload"));
        }
        hints.push(("esc", if self.editing { "clear search" } else { "quit" }));
        hints
    }
}

pub struct HelpBar<'a> {
    context: HintContext,
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(context: HintContext, theme: &'a Theme) -> Self {
        Self { context, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span<'_>> = self
            .context
            .hints()
            .into_iter()
            .enumerate()
            .flat_map(|(i, (key, action))| {
                let separator = if i == 0 { "" } else { " · " };
                [
                    Span::styled(separator, self.theme.dimmed_style()),
                    Span::styled(key, self.theme.accent_style()),
                    Span::raw(" "),
                    Span::styled(action, self.theme.dimmed_style()),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
