//! Selection controller
//!
//! Exactly one node in the whole tree may be selected. Selecting a node
//! replaces any previous selection anywhere in the tree, including branches
//! that are collapsed or filtered out of view. Selecting the node that is
//! already selected toggles it off.
//!
//! Paths that do not resolve in the taxonomy are ignored: the state comes
//! back unchanged. A stale id (say, from before a reload) is not an error.

use super::TreeState;
use crate::taxonomy::{LineIds, NodeKind, NodePath, Taxonomy};
use tracing::trace;

impl TreeState {
    /// Select `path`, or clear the selection if `path` is already selected
    #[must_use]
    pub fn select(&self, taxonomy: &Taxonomy, path: NodePath) -> Self {
        if !taxonomy.contains(&path) {
            trace!(%path, "select ignored: unknown node");
            return self.clone();
        }

        if self.is_selected(&path) {
            trace!(%path, "selection toggled off");
            return self.cleared();
        }

        trace!(%path, "selected");
        Self {
            selected: Some(path),
            expanded: self.expanded.clone(),
        }
    }

    #[must_use]
    pub fn select_category(&self, taxonomy: &Taxonomy, category: &str) -> Self {
        self.select(taxonomy, NodePath::category(category))
    }

    #[must_use]
    pub fn select_subcategory(&self, taxonomy: &Taxonomy, category: &str, subcategory: &str) -> Self {
        self.select(taxonomy, NodePath::subcategory(category, subcategory))
    }

    #[must_use]
    pub fn select_record(
        &self,
        taxonomy: &Taxonomy,
        category: &str,
        subcategory: &str,
        record: &str,
    ) -> Self {
        self.select(taxonomy, NodePath::record(category, subcategory, record))
    }

    /// Drop the selection; expansion is untouched
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            selected: None,
            expanded: self.expanded.clone(),
        }
    }
}

/// Summary of the current selection for status lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    pub path: NodePath,
    /// Stable line id, when the path is numbered
    pub line_id: Option<usize>,
    pub category_name: String,
    pub subcategory_name: Option<String>,
    pub record_name: Option<String>,
}

impl SelectedItem {
    /// Resolve names and line id for `path`
    ///
    /// Returns `None` if any level of the path is missing from `taxonomy`.
    #[must_use]
    pub fn resolve(taxonomy: &Taxonomy, line_ids: &LineIds, path: &NodePath) -> Option<Self> {
        let category = taxonomy.category(path.category_id())?;
        let (subcategory_name, record_name) = match path {
            NodePath::Category { .. } => (None, None),
            NodePath::Subcategory { subcategory, .. } => {
                (Some(category.subcategory(subcategory)?.name.clone()), None)
            }
            NodePath::Record {
                subcategory,
                record,
                ..
            } => {
                let sub = category.subcategory(subcategory)?;
                (
                    Some(sub.name.clone()),
                    Some(sub.record_type(record)?.name.clone()),
                )
            }
        };

        Some(Self {
            path: path.clone(),
            line_id: line_ids.get(path),
            category_name: category.name.clone(),
            subcategory_name,
            record_name,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.path.kind()
    }

    /// Line id as shown to the user, `#-` when the path is unnumbered
    #[must_use]
    pub fn line_label(&self) -> String {
        self.line_id
            .map_or_else(|| "#-".to_string(), |number| format!("#{number}"))
    }

    /// Name of the selected node itself
    #[must_use]
    pub fn name(&self) -> &str {
        self.record_name
            .as_deref()
            .or(self.subcategory_name.as_deref())
            .unwrap_or(&self.category_name)
    }

    /// Names from the category down to the selected node, joined with ` › `
    #[must_use]
    pub fn breadcrumb(&self) -> String {
        std::iter::once(self.category_name.as_str())
            .chain(self.subcategory_name.as_deref())
            .chain(self.record_name.as_deref())
            .collect::<Vec<_>>()
            .join(" › ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_taxonomy;

    fn selected_count(taxonomy: &Taxonomy, state: &TreeState) -> usize {
        taxonomy
            .paths()
            .iter()
            .filter(|p| state.is_selected(p))
            .count()
    }

    #[test]
    fn test_select_then_select_elsewhere_moves_selection() {
        let tax = sample_taxonomy();
        let state = TreeState::new()
            .select_record(&tax, "accounts-legal", "bookkeeping", "annual-reports")
            .select_category(&tax, "accounts-legal");

        assert_eq!(state.selected(), Some(&NodePath::category("accounts-legal")));
        assert!(!state.is_selected(&NodePath::record(
            "accounts-legal",
            "bookkeeping",
            "annual-reports"
        )));
        assert_eq!(selected_count(&tax, &state), 1);
    }

    #[test]
    fn test_selection_is_exclusive_over_any_sequence() {
        let tax = sample_taxonomy();
        let mut state = TreeState::new();
        for path in tax.paths().iter().rev().chain(tax.paths().iter()) {
            state = state.select(&tax, path.clone());
            assert!(selected_count(&tax, &state) <= 1);
        }
    }

    #[test]
    fn test_selecting_child_does_not_select_ancestors() {
        let tax = sample_taxonomy();
        let state = TreeState::new().select_subcategory(&tax, "tax-records", "income-tax");
        assert!(!state.is_selected(&NodePath::category("tax-records")));
        assert!(!state.is_selected(&NodePath::record(
            "tax-records",
            "income-tax",
            "tax-returns"
        )));
    }

    #[test]
    fn test_toggle_off_then_reselect() {
        let tax = sample_taxonomy();
        let first = TreeState::new().select_category(&tax, "tax-records");
        let second = first.select_category(&tax, "tax-records");
        assert!(!second.has_selection());

        let third = second.select_category(&tax, "tax-records");
        assert_eq!(third.selected(), Some(&NodePath::category("tax-records")));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let tax = sample_taxonomy();
        let state = TreeState::new().select_category(&tax, "tax-records");

        assert_eq!(state.select_category(&tax, "missing"), state);
        assert_eq!(state.select_subcategory(&tax, "tax-records", "missing"), state);
        assert_eq!(
            state.select_record(&tax, "tax-records", "income-tax", "missing"),
            state
        );
        // Right id under the wrong parent is still unknown
        assert_eq!(state.select_subcategory(&tax, "accounts-legal", "income-tax"), state);
    }

    #[test]
    fn test_clear_keeps_expansion() {
        let tax = sample_taxonomy();
        let state = TreeState::new()
            .toggle_category(&tax, "tax-records")
            .select_category(&tax, "tax-records")
            .cleared();
        assert!(!state.has_selection());
        assert!(state.is_expanded(&NodePath::category("tax-records")));
    }

    #[test]
    fn test_selection_locks_other_nodes() {
        let tax = sample_taxonomy();
        let state = TreeState::new().select_subcategory(&tax, "tax-records", "income-tax");
        assert!(state.is_selectable(&NodePath::subcategory("tax-records", "income-tax")));
        assert!(!state.is_selectable(&NodePath::category("tax-records")));
        assert!(!state.is_selectable(&NodePath::category("hr-records")));
        assert!(state.cleared().is_selectable(&NodePath::category("hr-records")));
    }

    #[test]
    fn test_selected_item_resolution() {
        let tax = sample_taxonomy();
        let ids = LineIds::build(&tax);
        let path = NodePath::record("accounts-legal", "bookkeeping", "annual-reports");
        let item = SelectedItem::resolve(&tax, &ids, &path).unwrap();

        assert_eq!(item.line_id, Some(3));
        assert_eq!(item.line_label(), "#3");
        assert_eq!(item.kind(), NodeKind::RecordType);
        assert_eq!(item.name(), "Annual reports and financial statements");
        assert_eq!(
            item.breadcrumb(),
            "Accounts and legal records › Bookkeeping, financial and accounting records › Annual reports and financial statements"
        );
        assert!(SelectedItem::resolve(&tax, &ids, &NodePath::category("missing")).is_none());
    }

    #[test]
    fn test_line_label_without_line_id() {
        let tax = sample_taxonomy();
        let path = NodePath::category("tax-records");
        let item = SelectedItem::resolve(&tax, &LineIds::default(), &path).unwrap();
        assert_eq!(item.line_id, None);
        assert_eq!(item.line_label(), "#-");
    }
}
