//! Stable numeric line ids
//!
//! Every category, subcategory and record type gets a number 1..N in
//! depth-first order. Numbers are keyed by structural path, so a path that
//! appears twice (duplicate sibling ids) keeps the number it got first.
//! The map is built once per loaded tree and never changes with selection,
//! expansion or search state.

use super::path::NodePath;
use super::types::Taxonomy;
use std::collections::HashMap;

/// Depth-first numbering of every node in a loaded taxonomy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIds {
    by_path: HashMap<NodePath, usize>,
    /// Index `n - 1` holds the path that owns line id `n`
    by_number: Vec<NodePath>,
}

impl LineIds {
    /// Number every node of `taxonomy`
    ///
    /// # Examples
    /// ```
    /// # use taxonav::taxonomy::{Category, LineIds, NodePath, RecordType, Subcategory, Taxonomy};
    /// let tax = Taxonomy::new(vec![Category::new(
    ///     "a",
    ///     "A",
    ///     vec![Subcategory::new("b", "B", vec![RecordType::new("c", "C")])],
    /// )]);
    /// let ids = LineIds::build(&tax);
    /// assert_eq!(ids.get(&NodePath::category("a")), Some(1));
    /// assert_eq!(ids.get(&NodePath::record("a", "b", "c")), Some(3));
    /// ```
    #[must_use]
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let mut ids = Self::default();
        for path in taxonomy.paths() {
            if !ids.by_path.contains_key(&path) {
                ids.by_number.push(path.clone());
                ids.by_path.insert(path, ids.by_number.len());
            }
        }
        ids
    }

    /// Line id of the node at `path`
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    /// Path owning line id `number`
    #[must_use]
    pub fn path_of(&self, number: usize) -> Option<&NodePath> {
        number.checked_sub(1).and_then(|i| self.by_number.get(i))
    }

    /// Number of distinct line ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{Category, RecordType, Subcategory};
    use crate::testing::sample_taxonomy;

    #[test]
    fn test_numbers_are_contiguous_depth_first() {
        let tax = sample_taxonomy();
        let ids = LineIds::build(&tax);
        assert_eq!(ids.len(), tax.node_count());
        for (i, path) in tax.paths().iter().enumerate() {
            assert_eq!(ids.get(path), Some(i + 1));
            assert_eq!(ids.path_of(i + 1), Some(path));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let tax = sample_taxonomy();
        assert_eq!(LineIds::build(&tax), LineIds::build(&tax));
    }

    #[test]
    fn test_duplicate_paths_share_first_number() {
        let tax = Taxonomy::new(vec![Category::new(
            "a",
            "A",
            vec![
                Subcategory::new("dup", "First", vec![RecordType::new("r", "R")]),
                Subcategory::new("dup", "Second", vec![]),
                Subcategory::new("other", "Other", vec![]),
            ],
        )]);
        let ids = LineIds::build(&tax);
        assert_eq!(ids.get(&NodePath::subcategory("a", "dup")), Some(2));
        assert_eq!(ids.get(&NodePath::record("a", "dup", "r")), Some(3));
        assert_eq!(ids.get(&NodePath::subcategory("a", "other")), Some(4));
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_unknown_lookups() {
        let ids = LineIds::build(&sample_taxonomy());
        assert_eq!(ids.get(&NodePath::category("nope")), None);
        assert_eq!(ids.path_of(0), None);
        assert_eq!(ids.path_of(ids.len() + 1), None);
    }
}
