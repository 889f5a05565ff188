//! Taxonomy store
//!
//! Single source of truth for a loaded tree: the static taxonomy, its line
//! ids and the current [`TreeState`]. All three sit behind `Arc`s and are
//! replaced wholesale, never patched, so a reader holding an earlier handle
//! keeps a consistent snapshot.

use super::line_ids::LineIds;
use super::path::NodePath;
use super::types::{CategoryNode, Taxonomy};
use crate::state::{SelectedItem, TreeState};
use std::sync::Arc;
use tracing::debug;

/// Loaded taxonomy plus its mutable UI state
#[derive(Debug, Clone, Default)]
pub struct TaxonomyStore {
    taxonomy: Arc<Taxonomy>,
    line_ids: Arc<LineIds>,
    state: Arc<TreeState>,
}

impl TaxonomyStore {
    /// Wrap a freshly loaded taxonomy with nothing selected or expanded
    #[must_use]
    pub fn new(taxonomy: Taxonomy) -> Self {
        let line_ids = LineIds::build(&taxonomy);
        Self {
            taxonomy: Arc::new(taxonomy),
            line_ids: Arc::new(line_ids),
            state: Arc::new(TreeState::new()),
        }
    }

    /// Swap in a reloaded taxonomy
    ///
    /// Line ids are recomputed and the UI state starts over.
    pub fn replace(&mut self, taxonomy: Taxonomy) {
        debug!(nodes = taxonomy.node_count(), "replacing taxonomy");
        *self = Self::new(taxonomy);
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Arc<Taxonomy> {
        &self.taxonomy
    }

    #[must_use]
    pub fn line_ids(&self) -> &Arc<LineIds> {
        &self.line_ids
    }

    #[must_use]
    pub fn state(&self) -> &Arc<TreeState> {
        &self.state
    }

    /// Replace the state with the result of `f`
    ///
    /// `f` receives the taxonomy and the current state and returns the next
    /// state. The store only swaps when the value actually changed.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&Taxonomy, &TreeState) -> TreeState,
    {
        let next = f(&self.taxonomy, &self.state);
        if next != *self.state {
            self.state = Arc::new(next);
        }
    }

    /// Summary of the selected node, if any
    #[must_use]
    pub fn selected_item(&self) -> Option<SelectedItem> {
        self.state
            .selected()
            .and_then(|path| SelectedItem::resolve(&self.taxonomy, &self.line_ids, path))
    }

    /// Line id of the node at `path`
    #[must_use]
    pub fn line_id(&self, path: &NodePath) -> Option<usize> {
        self.line_ids.get(path)
    }

    /// Canonical tree with flags
    #[must_use]
    pub fn snapshot(&self) -> Vec<CategoryNode> {
        self.taxonomy.snapshot(&self.state)
    }
}
