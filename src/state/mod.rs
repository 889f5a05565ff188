//! Mutable UI state for a loaded taxonomy
//!
//! Selection and expansion are kept in keyed maps, separate from the static
//! [`Taxonomy`](crate::taxonomy::Taxonomy) content. Every controller operation
//! takes `&self` and returns a new [`TreeState`]; callers swap the new value in
//! wholesale so nobody observes a half-applied update.
//!
//! - [`selection`]: single, globally exclusive selection with toggle-off
//! - [`expansion`]: per-node open/closed flags, independent of selection

pub mod expansion;
pub mod selection;

pub use selection::SelectedItem;

use crate::taxonomy::NodePath;
use std::collections::HashSet;

/// Selection pointer and expansion set for one loaded tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    /// The one selected node, if any
    selected: Option<NodePath>,
    /// Expanded categories and subcategories
    expanded: HashSet<NodePath>,
}

impl TreeState {
    /// Fresh state: nothing selected, everything collapsed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected node
    #[must_use]
    pub const fn selected(&self) -> Option<&NodePath> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, path: &NodePath) -> bool {
        self.selected.as_ref() == Some(path)
    }

    #[must_use]
    pub fn is_expanded(&self, path: &NodePath) -> bool {
        self.expanded.contains(path)
    }

    /// Whether `path` may be clicked for selection
    ///
    /// Once a node is selected every other node is locked until the
    /// selection is cleared; only the selected node itself stays enabled so
    /// it can be toggled off.
    #[must_use]
    pub fn is_selectable(&self, path: &NodePath) -> bool {
        self.selected.as_ref().is_none_or(|selected| selected == path)
    }

    /// Whether any node holds the selection
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Number of expanded nodes
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_empty() {
        let state = TreeState::new();
        assert!(!state.has_selection());
        assert_eq!(state.expanded_count(), 0);
        assert!(state.is_selectable(&NodePath::category("anything")));
    }
}
