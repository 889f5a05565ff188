//! Status bar widget showing load progress and the current selection

use crate::session::LoadState;
use crate::state::SelectedItem;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Status bar widget
pub struct StatusBar<'a> {
    load_state: &'a LoadState,
    selected: Option<&'a SelectedItem>,
    /// Where the taxonomy comes from
    source: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(
        load_state: &'a LoadState,
        selected: Option<&'a SelectedItem>,
        source: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            load_state,
            selected,
            source,
            theme,
        }
    }

    fn load_line(&self) -> Line<'a> {
        match self.load_state {
            LoadState::Empty => Line::styled("No taxonomy loaded", self.theme.dimmed_style()),
            LoadState::Loading => Line::styled(
                format!("⟳ Loading {}…", self.source),
                self.theme.warning_style(),
            ),
            LoadState::Ready => Line::styled(format!("✓ {}", self.source), self.theme.info_style()),
            LoadState::Failed { message, retryable } => {
                let hint = if *retryable {
                    "  ctrl+r: retry"
                } else {
                    "  ctrl+r: reload once fixed"
                };
                Line::from(vec![
                    Span::styled(format!("✗ {message}"), self.theme.error_style()),
                    Span::styled(hint, self.theme.dimmed_style()),
                ])
            }
        }
    }

    fn selection_line(&self) -> Line<'a> {
        match self.selected {
            Some(item) => Line::from(vec![
                Span::styled("● ", self.theme.selected_style()),
                Span::raw(item.breadcrumb()),
                Span::styled(format!("  {}", item.line_label()), self.theme.dimmed_style()),
            ]),
            None => Line::styled("Nothing selected", self.theme.dimmed_style()),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Status ");

        let inner = block.inner(area);
        block.render(area, buf);

        // Left: selection summary, right: load state
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(inner);

        Paragraph::new(self.selection_line()).render(chunks[0], buf);
        Paragraph::new(self.load_line())
            .alignment(ratatui::layout::Alignment::Right)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::NodePath;
    use crate::testing::{buffer_text, sample_session};

    fn render(load_state: &LoadState, selected: Option<&SelectedItem>) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 240, 3);
        let mut buf = Buffer::empty(area);
        StatusBar::new(load_state, selected, "built-in taxonomy", &theme).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_selection_shows_breadcrumb_and_line_id() {
        let mut session = sample_session();
        let path = NodePath::record("accounts-legal", "bookkeeping", "annual-reports");
        assert!(session.activate(&path));

        let selected = session.selected_item();
        let text = render(session.load_state(), selected.as_ref());
        assert!(text.contains("● Accounts and legal records"));
        assert!(text.contains("#3"));
        assert!(text.contains("✓ built-in taxonomy"));
    }

    #[test]
    fn test_failure_hint_depends_on_retryability() {
        let transient = LoadState::Failed {
            message: "server responded with status 503".to_string(),
            retryable: true,
        };
        assert!(render(&transient, None).contains("ctrl+r: retry"));

        let rejected = LoadState::Failed {
            message: "bad payload".to_string(),
            retryable: false,
        };
        let text = render(&rejected, None);
        assert!(text.contains("ctrl+r: reload once fixed"));
        assert!(text.contains("Nothing selected"));
    }
}
