//! Taxonomy data model
//!
//! A fixed three-level tree: category → subcategory → record type.
//!
//! - [`types`]: static content (ids, names, children)
//! - [`path`]: parent-scoped node addressing
//! - [`line_ids`]: stable depth-first numbering for display
//! - [`store`]: the loaded tree plus its UI state, replaced wholesale
//! - [`fixture`]: the bundled taxonomy

pub mod fixture;
pub mod line_ids;
pub mod path;
pub mod store;
pub mod types;

pub use line_ids::LineIds;
pub use path::{NodeKind, NodePath};
pub use store::TaxonomyStore;
pub use types::{
    Category, CategoryNode, RecordType, RecordTypeNode, Subcategory, SubcategoryNode, Taxonomy,
};
