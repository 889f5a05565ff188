//! Taxonomy tree widget
//!
//! Draws the flattened rows produced by [`crate::view::visible_rows`]: one
//! line per node, indented by depth, with an expansion marker, the
//! selection control and the highlighted name.

use crate::taxonomy::NodeKind;
use crate::ui::ratatui_adapter::state::ViewState;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::view::Row;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Tree widget over a slice of visible rows
pub struct TreeList<'a> {
    rows: &'a [Row<'a>],
    view: &'a ViewState,
    theme: &'a Theme,
    title: String,
    /// Shown when there are no rows
    placeholder: &'a str,
}

impl<'a> TreeList<'a> {
    #[must_use]
    pub fn new(rows: &'a [Row<'a>], view: &'a ViewState, theme: &'a Theme) -> Self {
        Self {
            rows,
            view,
            theme,
            title: " Taxonomy ".to_string(),
            placeholder: "No categories",
        }
    }

    /// Set custom title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the text shown for an empty tree
    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    fn render_row(&self, row: &'a Row<'a>, is_cursor: bool) -> ListItem<'a> {
        let cursor_char = if is_cursor { ">" } else { " " };
        let marker = match (row.kind(), row.has_children, row.expanded) {
            (NodeKind::RecordType, _, _) | (_, false, _) => "  ",
            (_, true, true) => "▾ ",
            (_, true, false) => "▸ ",
        };
        let (select_char, select_style) = if row.selected {
            ("●", self.theme.selected_style())
        } else if row.selectable {
            ("○", self.theme.normal_style())
        } else {
            ("○", self.theme.locked_style())
        };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.accent_style()),
            Span::raw(" "),
            Span::raw("  ".repeat(row.depth())),
            Span::styled(marker, self.theme.dimmed_style()),
            Span::styled(select_char, select_style),
            Span::raw(" "),
        ];

        for segment in &row.segments {
            if segment.matched {
                spans.push(Span::styled(segment.text, self.theme.match_style()));
            } else {
                spans.push(Span::raw(segment.text));
            }
        }

        if let Some(id) = row.line_id {
            spans.push(Span::styled(format!("  #{id}"), self.theme.dimmed_style()));
        }

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.cursor_row_style())
        } else {
            item
        }
    }
}

impl Widget for TreeList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            Paragraph::new(Line::styled(self.placeholder, self.theme.dimmed_style()))
                .render(inner, buf);
            return;
        }

        let visible_height = inner.height as usize;
        let start = self.view.scroll_offset.min(self.rows.len());
        let end = (start + visible_height).min(self.rows.len());

        let items: Vec<ListItem> = self.rows[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| self.render_row(row, start + offset == self.view.cursor))
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TreeState;
    use crate::taxonomy::LineIds;
    use crate::testing::{buffer_text, sample_taxonomy};
    use crate::view::visible_rows;

    #[test]
    fn test_renders_rows_with_cursor_and_ids() {
        let tax = sample_taxonomy();
        let ids = LineIds::build(&tax);
        let rows = visible_rows(&tax, &TreeState::new(), &ids, None);
        let mut view = ViewState::new();
        view.sync(rows.len());
        view.cursor_down();

        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        TreeList::new(&rows, &view, &theme).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Accounts and legal records  #1"));
        assert!(text.contains("> ▸ ○ Tax records"));
    }

    #[test]
    fn test_empty_tree_shows_placeholder() {
        let view = ViewState::new();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        TreeList::new(&[], &view, &theme)
            .placeholder("Loading…")
            .render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Loading…"));
    }
}
