//! Cursor and viewport state for the tree browser
//!
//! Everything about the taxonomy itself lives in the [`Session`]; this is
//! only where the cursor sits and which slice of rows is on screen.
//!
//! [`Session`]: crate::session::Session

/// Cursor position and scroll window over the visible rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Index of the row under the cursor
    pub cursor: usize,
    /// Index of the first row on screen
    pub scroll_offset: usize,
    /// Height of the tree area (set during render)
    pub visible_height: usize,
    /// Number of rows currently visible
    row_count: usize,
    /// Set when the user asked to leave
    pub should_exit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            scroll_offset: 0,
            visible_height: 20, // Updated during render
            row_count: 0,
            should_exit: false,
        }
    }

    /// Record the current number of rows, pulling the cursor back in range
    pub const fn sync(&mut self, row_count: usize) {
        self.row_count = row_count;
        if self.cursor >= row_count {
            self.cursor = row_count.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    /// Move cursor up
    pub const fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub const fn cursor_down(&mut self) {
        if self.cursor + 1 < self.row_count {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub const fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self) {
        let max_cursor = self.row_count.saturating_sub(1);
        self.cursor = (self.cursor + self.visible_height).min(max_cursor);
        self.adjust_scroll();
    }

    /// Jump to first row
    pub const fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last row
    pub const fn jump_to_end(&mut self) {
        self.cursor = self.row_count.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Put the cursor on row `index` if it exists
    pub const fn jump_to(&mut self, index: usize) {
        if index < self.row_count {
            self.cursor = index;
            self.adjust_scroll();
        }
    }

    /// Adjust scroll offset to keep cursor visible
    const fn adjust_scroll(&mut self) {
        if self.visible_height == 0 {
            return;
        }
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_height {
            self.scroll_offset = self.cursor.saturating_sub(self.visible_height - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(rows: usize, height: usize) -> ViewState {
        let mut view = ViewState::new();
        view.visible_height = height;
        view.sync(rows);
        view
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut view = view(3, 10);
        view.cursor_up();
        assert_eq!(view.cursor, 0);
        view.cursor_down();
        view.cursor_down();
        view.cursor_down();
        assert_eq!(view.cursor, 2);
    }

    #[test]
    fn test_sync_clamps_cursor_when_rows_shrink() {
        let mut view = view(10, 5);
        view.jump_to_end();
        assert_eq!(view.cursor, 9);
        view.sync(4);
        assert_eq!(view.cursor, 3);
        view.sync(0);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut view = view(30, 5);
        view.page_down();
        assert_eq!(view.cursor, 5);
        assert_eq!(view.scroll_offset, 1);
        view.jump_to_start();
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn test_jump_to_ignores_missing_rows() {
        let mut view = view(4, 5);
        view.jump_to(2);
        assert_eq!(view.cursor, 2);
        view.jump_to(9);
        assert_eq!(view.cursor, 2);
    }
}
