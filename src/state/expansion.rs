//! Expansion controller
//!
//! Expansion only decides which descendants are visible. It is independent
//! of selection: toggling works on every category and subcategory even while
//! another branch holds the selection lock. Record types have no flag.

use super::TreeState;
use crate::taxonomy::{NodePath, Taxonomy};
use tracing::trace;

impl TreeState {
    /// Flip the expansion flag of the category or subcategory at `path`
    ///
    /// Record paths and paths that do not resolve are no-ops.
    #[must_use]
    pub fn toggle_expanded(&self, taxonomy: &Taxonomy, path: &NodePath) -> Self {
        if !path.is_expandable() || !taxonomy.contains(path) {
            trace!(%path, "toggle ignored");
            return self.clone();
        }

        let mut expanded = self.expanded.clone();
        if !expanded.remove(path) {
            expanded.insert(path.clone());
        }

        Self {
            selected: self.selected.clone(),
            expanded,
        }
    }

    #[must_use]
    pub fn toggle_category(&self, taxonomy: &Taxonomy, category: &str) -> Self {
        self.toggle_expanded(taxonomy, &NodePath::category(category))
    }

    #[must_use]
    pub fn toggle_subcategory(&self, taxonomy: &Taxonomy, category: &str, subcategory: &str) -> Self {
        self.toggle_expanded(taxonomy, &NodePath::subcategory(category, subcategory))
    }

    /// Expand every category and subcategory; selection is untouched
    ///
    /// Unlike folding [`TreeState::toggle_expanded`] over the tree, this is
    /// idempotent.
    #[must_use]
    pub fn expanded_all(&self, taxonomy: &Taxonomy) -> Self {
        Self {
            selected: self.selected.clone(),
            expanded: taxonomy
                .paths()
                .into_iter()
                .filter(NodePath::is_expandable)
                .collect(),
        }
    }

    /// Collapse every node; selection is untouched
    #[must_use]
    pub fn collapsed_all(&self) -> Self {
        Self {
            selected: self.selected.clone(),
            expanded: Default::default(),
        }
    }
}
