//! Node addressing
//!
//! Identifiers are only unique among siblings, so a node is addressed by the
//! full chain of ids from its category down to itself.

use std::fmt;

/// The three fixed levels of the taxonomy tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Top-level category
    Category,
    /// Second-level subcategory
    Subcategory,
    /// Leaf record type
    RecordType,
}

impl NodeKind {
    /// Human readable label used in status lines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::RecordType => "record type",
        }
    }
}

/// Address of a single node in the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodePath {
    /// A category, addressed by its own id
    Category { category: String },
    /// A subcategory under a category
    Subcategory { category: String, subcategory: String },
    /// A record type under a subcategory
    Record {
        category: String,
        subcategory: String,
        record: String,
    },
}

impl NodePath {
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self::Category {
            category: category.into(),
        }
    }

    #[must_use]
    pub fn subcategory(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self::Subcategory {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    #[must_use]
    pub fn record(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        record: impl Into<String>,
    ) -> Self {
        Self::Record {
            category: category.into(),
            subcategory: subcategory.into(),
            record: record.into(),
        }
    }

    /// Which level of the tree this path points at
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Category { .. } => NodeKind::Category,
            Self::Subcategory { .. } => NodeKind::Subcategory,
            Self::Record { .. } => NodeKind::RecordType,
        }
    }

    /// Depth of the node (0 = category)
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Category { .. } => 0,
            Self::Subcategory { .. } => 1,
            Self::Record { .. } => 2,
        }
    }

    /// Id of the category this path lives under (or is)
    #[must_use]
    pub fn category_id(&self) -> &str {
        match self {
            Self::Category { category }
            | Self::Subcategory { category, .. }
            | Self::Record { category, .. } => category,
        }
    }

    /// Path of the parent node, `None` for categories
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Category { .. } => None,
            Self::Subcategory { category, .. } => Some(Self::category(category.clone())),
            Self::Record {
                category,
                subcategory,
                ..
            } => Some(Self::subcategory(category.clone(), subcategory.clone())),
        }
    }

    /// Whether this node carries an expansion flag
    #[must_use]
    pub const fn is_expandable(&self) -> bool {
        !matches!(self, Self::Record { .. })
    }

    /// Structural key, e.g. `cat:tax-records/sub:income-tax/nested:tax-returns`
    ///
    /// # Examples
    /// ```
    /// # use taxonav::taxonomy::NodePath;
    /// assert_eq!(NodePath::category("tax").key(), "cat:tax");
    /// assert_eq!(NodePath::subcategory("tax", "vat").key(), "cat:tax/sub:vat");
    /// ```
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Category { category } => format!("cat:{category}"),
            Self::Subcategory {
                category,
                subcategory,
            } => format!("cat:{category}/sub:{subcategory}"),
            Self::Record {
                category,
                subcategory,
                record,
            } => format!("cat:{category}/sub:{subcategory}/nested:{record}"),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(NodePath::category("a").key(), "cat:a");
        assert_eq!(NodePath::subcategory("a", "b").key(), "cat:a/sub:b");
        assert_eq!(NodePath::record("a", "b", "c").key(), "cat:a/sub:b/nested:c");
    }

    #[test]
    fn test_parent_chain() {
        let record = NodePath::record("a", "b", "c");
        let sub = record.parent().unwrap();
        assert_eq!(sub, NodePath::subcategory("a", "b"));
        assert_eq!(sub.parent(), Some(NodePath::category("a")));
        assert_eq!(NodePath::category("a").parent(), None);
    }

    #[test]
    fn test_kind_and_depth() {
        assert_eq!(NodePath::category("a").kind(), NodeKind::Category);
        assert_eq!(NodePath::record("a", "b", "c").depth(), 2);
        assert!(NodePath::subcategory("a", "b").is_expandable());
        assert!(!NodePath::record("a", "b", "c").is_expandable());
    }

    #[test]
    fn test_same_id_different_parent_is_distinct() {
        assert_ne!(
            NodePath::subcategory("a", "shared"),
            NodePath::subcategory("b", "shared")
        );
    }
}
