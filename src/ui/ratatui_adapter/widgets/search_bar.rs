//! Search bar widget for query input

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with cursor
pub struct SearchBar<'a> {
    /// Current query text
    query: &'a str,
    /// Prompt text
    prompt: &'a str,
    /// Theme for styling
    theme: &'a Theme,
    /// Whether a keystroke is waiting for the debounce window
    pending: bool,
}

impl<'a> SearchBar<'a> {
    /// Create a new search bar widget
    #[must_use]
    pub const fn new(query: &'a str, prompt: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            prompt,
            theme,
            pending: false,
        }
    }

    /// Mark the query as not yet applied
    #[must_use]
    pub const fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.pending { " Search … " } else { " Search " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.accent_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(self.prompt, self.theme.dimmed_style()),
            Span::raw(" "),
            Span::raw(self.query),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
