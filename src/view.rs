//! Presentation rows
//!
//! Flattens the (possibly filtered) tree into the rows a frontend draws, in
//! display order. Each row carries everything needed to render it: indent,
//! highlighted name, flags and whether its selection control is enabled.
//!
//! While a query is active every kept category and subcategory is shown
//! expanded. That is a property of the projection only; the stored
//! expansion flags are left alone.

use crate::search::{Segment, filter_taxonomy, highlight};
use crate::state::TreeState;
use crate::taxonomy::{LineIds, NodeKind, NodePath, Taxonomy};

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub path: NodePath,
    /// Display name split into plain and highlighted runs
    pub segments: Vec<Segment<'a>>,
    pub line_id: Option<usize>,
    pub selected: bool,
    /// Always `false` for record types
    pub expanded: bool,
    pub has_children: bool,
    /// `false` when another node holds the selection lock
    pub selectable: bool,
}

impl Row<'_> {
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.path.depth()
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.path.kind()
    }

    /// The name without highlighting
    #[must_use]
    pub fn name(&self) -> String {
        self.segments.iter().map(|s| s.text).collect()
    }
}

/// Build the visible rows for `state`, filtered by `query` when given
#[must_use]
pub fn visible_rows<'a>(
    taxonomy: &'a Taxonomy,
    state: &TreeState,
    line_ids: &LineIds,
    query: Option<&str>,
) -> Vec<Row<'a>> {
    let query = query.filter(|q| !crate::search::is_blank(q));
    let searching = query.is_some();
    let query_text = query.unwrap_or("");

    let row = |path: NodePath, name: &'a str, expanded: bool, has_children: bool| Row {
        segments: highlight(name, query_text),
        line_id: line_ids.get(&path),
        selected: state.is_selected(&path),
        selectable: state.is_selectable(&path),
        expanded,
        has_children,
        path,
    };

    let mut rows = Vec::new();
    for cat in filter_taxonomy(taxonomy, query_text) {
        let cat_path = NodePath::category(cat.category.id.as_str());
        let cat_expanded = searching || state.is_expanded(&cat_path);
        rows.push(row(
            cat_path,
            &cat.category.name,
            cat_expanded,
            !cat.subcategories.is_empty(),
        ));
        if !cat_expanded {
            continue;
        }

        for sub in cat.subcategories {
            let sub_path = NodePath::subcategory(cat.category.id.as_str(), sub.subcategory.id.as_str());
            let sub_expanded = searching || state.is_expanded(&sub_path);
            rows.push(row(
                sub_path,
                &sub.subcategory.name,
                sub_expanded,
                !sub.record_types.is_empty(),
            ));
            if !sub_expanded {
                continue;
            }

            for rec in sub.record_types {
                let rec_path = NodePath::record(
                    cat.category.id.as_str(),
                    sub.subcategory.id.as_str(),
                    rec.id.as_str(),
                );
                rows.push(row(rec_path, &rec.name, false, false));
            }
        }
    }
    rows
}
