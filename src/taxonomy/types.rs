//! Static taxonomy content
//!
//! These types carry only ids, names and children. Per-node UI flags
//! (`selected`, `expanded`) live in [`TreeState`] so the taxonomy can be
//! shared read-only for the lifetime of a load.

use super::path::NodePath;
use crate::state::TreeState;
use serde::{Deserialize, Serialize};

/// Leaf node of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    pub id: String,
    pub name: String,
}

/// Second-level node grouping record types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    /// Record types in insertion order (may be empty)
    #[serde(default)]
    pub record_types: Vec<RecordType>,
}

/// Top-level node of the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Subcategories in insertion order (may be empty)
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl RecordType {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl Subcategory {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        record_types: Vec<RecordType>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            record_types,
        }
    }

    /// Look up a record type by id (first match wins)
    #[must_use]
    pub fn record_type(&self, id: &str) -> Option<&RecordType> {
        self.record_types.iter().find(|r| r.id == id)
    }
}

impl Category {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subcategories: Vec<Subcategory>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subcategories,
        }
    }

    /// Look up a subcategory by id (first match wins)
    #[must_use]
    pub fn subcategory(&self, id: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

/// The whole three-level tree, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    #[must_use]
    pub const fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of nodes across all three levels
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.categories
            .iter()
            .map(|c| {
                1 + c
                    .subcategories
                    .iter()
                    .map(|s| 1 + s.record_types.len())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Look up a category by id (first match wins)
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Whether the path resolves to a node in this tree
    #[must_use]
    pub fn contains(&self, path: &NodePath) -> bool {
        self.name_of(path).is_some()
    }

    /// Display name of the node at `path`
    #[must_use]
    pub fn name_of(&self, path: &NodePath) -> Option<&str> {
        match path {
            NodePath::Category { category } => self.category(category).map(|c| c.name.as_str()),
            NodePath::Subcategory {
                category,
                subcategory,
            } => self
                .category(category)?
                .subcategory(subcategory)
                .map(|s| s.name.as_str()),
            NodePath::Record {
                category,
                subcategory,
                record,
            } => self
                .category(category)?
                .subcategory(subcategory)?
                .record_type(record)
                .map(|r| r.name.as_str()),
        }
    }

    /// Every node path in depth-first order
    #[must_use]
    pub fn paths(&self) -> Vec<NodePath> {
        let mut out = Vec::with_capacity(self.node_count());
        for cat in &self.categories {
            out.push(NodePath::category(cat.id.as_str()));
            for sub in &cat.subcategories {
                out.push(NodePath::subcategory(cat.id.as_str(), sub.id.as_str()));
                for rec in &sub.record_types {
                    out.push(NodePath::record(
                        cat.id.as_str(),
                        sub.id.as_str(),
                        rec.id.as_str(),
                    ));
                }
            }
        }
        out
    }

    /// Materialize the tree with per-node flags from `state`
    #[must_use]
    pub fn snapshot(&self, state: &TreeState) -> Vec<CategoryNode> {
        self.categories
            .iter()
            .map(|cat| {
                let cat_path = NodePath::category(cat.id.as_str());
                CategoryNode {
                    id: cat.id.clone(),
                    name: cat.name.clone(),
                    selected: state.is_selected(&cat_path),
                    expanded: state.is_expanded(&cat_path),
                    subcategories: cat
                        .subcategories
                        .iter()
                        .map(|sub| {
                            let sub_path = NodePath::subcategory(cat.id.as_str(), sub.id.as_str());
                            SubcategoryNode {
                                id: sub.id.clone(),
                                name: sub.name.clone(),
                                selected: state.is_selected(&sub_path),
                                expanded: state.is_expanded(&sub_path),
                                record_types: sub
                                    .record_types
                                    .iter()
                                    .map(|rec| RecordTypeNode {
                                        id: rec.id.clone(),
                                        name: rec.name.clone(),
                                        selected: state.is_selected(&NodePath::record(
                                            cat.id.as_str(),
                                            sub.id.as_str(),
                                            rec.id.as_str(),
                                        )),
                                    })
                                    .collect(),
                            }
                        })
                        .collect(),
                }
            })
            .collect()
    }
}

/// Record type with its selection flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTypeNode {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Subcategory with its selection and expansion flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryNode {
    pub id: String,
    pub name: String,
    pub selected: bool,
    pub expanded: bool,
    pub record_types: Vec<RecordTypeNode>,
}

/// Category with its selection and expansion flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub selected: bool,
    pub expanded: bool,
    pub subcategories: Vec<SubcategoryNode>,
}
